//! Durable store port for task rows.

use crate::task::domain::{PageQuery, Task, TaskChanges, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Durable task persistence contract.
///
/// The store is the source of truth. Writes run inside a transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new row keyed by the task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] on constraint violation
    /// (including a duplicate identifier) or connectivity failure.
    async fn create(&self, task: &Task) -> TaskStoreResult<()>;

    /// Removes the row with the given identifier.
    ///
    /// Removing an absent row is not an error.
    async fn delete_by_id(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Reads a single row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no row matches.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Task>;

    /// Reads one page of rows ordered by identifier, newest first.
    async fn find_all(&self, query: PageQuery) -> TaskStoreResult<Vec<Task>>;

    /// Counts all rows.
    async fn count_all(&self) -> TaskStoreResult<i64>;

    /// Applies a partial update and returns the refreshed row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no row matches `changes.id`.
    async fn update(&self, changes: &TaskChanges) -> TaskStoreResult<Task>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// No row matches the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
