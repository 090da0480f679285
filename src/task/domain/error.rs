//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The page number is below one.
    #[error("invalid page {0}, expected a positive integer")]
    InvalidPage(i64),

    /// The page size is below one.
    #[error("invalid page size {0}, expected a positive integer")]
    InvalidPageSize(i64),

    /// The row offset for the page does not fit in an `i64`.
    #[error("page {page} with size {size} overflows the row offset")]
    OffsetOverflow {
        /// Requested page.
        page: i64,
        /// Requested page size.
        size: i64,
    },
}
