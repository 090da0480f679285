//! Pagination query and paginated result types.

use super::{Task, TaskDomainError};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;

/// Raw pagination parameters as they arrive from a query string.
///
/// Missing values default to the first page of ten items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// One-based page number.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page length.
    #[serde(default = "default_page_size")]
    pub size: i64,
}

const fn default_page() -> i64 {
    DEFAULT_PAGE
}

const fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PageParams {
    /// Creates raw pagination parameters.
    #[must_use]
    pub const fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Validated pagination query.
///
/// `page` is one-based; the row offset is `(page - 1) * size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageQuery {
    page: i64,
    size: i64,
    offset: i64,
}

impl PageQuery {
    /// Creates a validated pagination query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPage`] when `page` is below one,
    /// [`TaskDomainError::InvalidPageSize`] when `size` is below one, and
    /// [`TaskDomainError::OffsetOverflow`] when the offset does not fit in an
    /// `i64`.
    pub const fn new(page: i64, size: i64) -> Result<Self, TaskDomainError> {
        if page < 1 {
            return Err(TaskDomainError::InvalidPage(page));
        }
        if size < 1 {
            return Err(TaskDomainError::InvalidPageSize(size));
        }
        let Some(offset) = (page - 1).checked_mul(size) else {
            return Err(TaskDomainError::OffsetOverflow { page, size });
        };
        Ok(Self { page, size, offset })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> i64 {
        self.page
    }

    /// Returns the page length.
    #[must_use]
    pub const fn size(self) -> i64 {
        self.size
    }

    /// Returns the number of rows skipped before this page.
    #[must_use]
    pub const fn offset(self) -> i64 {
        self.offset
    }
}

impl TryFrom<PageParams> for PageQuery {
    type Error = TaskDomainError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        Self::new(params.page, params.size)
    }
}

/// One page of tasks together with the unfiltered total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPage {
    /// Tasks on this page, newest first.
    pub items: Vec<Task>,
    /// One-based page number.
    pub page: i64,
    /// Page length.
    pub size: i64,
    /// Total number of tasks.
    pub total: i64,
}

impl TaskPage {
    /// Assembles a page from a query, its items, and the total count.
    #[must_use]
    pub const fn new(query: PageQuery, items: Vec<Task>, total: i64) -> Self {
        Self {
            items,
            page: query.page,
            size: query.size,
            total,
        }
    }
}
