//! Repository port consumed by the task service.

use super::{CacheStoreError, TaskStoreError};
use crate::task::domain::{PageQuery, Task, TaskChanges, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task data-access contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the insert fails and
    /// [`TaskRepositoryError::Cache`] when the insert committed but cached
    /// entries could not be invalidated.
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task. Deleting an absent task is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] or, after a committed delete,
    /// [`TaskRepositoryError::Cache`].
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Returns one page of tasks, newest first.
    async fn find_all(&self, query: PageQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts all tasks.
    async fn count_all(&self) -> TaskRepositoryResult<i64>;

    /// Applies a partial update and returns the task as stored afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::Cache`] when the update committed but cached
    /// entries could not be invalidated.
    async fn update(&self, changes: &TaskChanges) -> TaskRepositoryResult<Task>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The store has no matching row.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Durable store failure.
    #[error(transparent)]
    Store(TaskStoreError),

    /// Cache failure, on lookup or on invalidation after a committed write.
    #[error(transparent)]
    Cache(#[from] CacheStoreError),

    /// A cached value could not be deserialized.
    #[error("cached value under '{key}' could not be decoded: {source}")]
    Decode {
        /// Cache key or hash field holding the value.
        key: String,
        /// Deserialization failure.
        source: Arc<serde_json::Error>,
    },
}

impl TaskRepositoryError {
    /// Wraps a decode failure for the given cache key.
    pub fn decode(key: impl Into<String>, err: serde_json::Error) -> Self {
        Self::Decode {
            key: key.into(),
            source: Arc::new(err),
        }
    }
}

impl From<TaskStoreError> for TaskRepositoryError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => Self::NotFound(id),
            TaskStoreError::Persistence(_) => Self::Store(err),
        }
    }
}
