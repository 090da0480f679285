//! Service layer for task create, read, update, and delete.

use crate::task::{
    domain::{
        CreateTaskInput, PageParams, PageQuery, Task, TaskDomainError, TaskId, TaskIdGenerator,
        TaskPage, UpdateTaskInput,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns `true` when the requested task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(TaskRepositoryError::NotFound(_)))
    }

    /// Returns `true` when the caller supplied invalid input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task service.
///
/// Delegates to the repository, stamping identifiers and timestamps on the
/// way in and logging failures with the request context on the way out.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    ids: Arc<TaskIdGenerator>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with its own identifier generator.
    ///
    /// Clones share the generator. Separately constructed services writing
    /// to the same store should share one through
    /// [`TaskService::with_id_generator`] instead.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_id_generator(repository, clock, Arc::new(TaskIdGenerator::new()))
    }

    /// Creates a task service that issues identifiers from `ids`.
    ///
    /// Identifiers are unique across every service holding the same
    /// generator. Services in different processes cannot share one, so a
    /// colliding identifier there fails the insert with a store error.
    #[must_use]
    pub const fn with_id_generator(
        repository: Arc<R>,
        clock: Arc<C>,
        ids: Arc<TaskIdGenerator>,
    ) -> Self {
        Self {
            repository,
            clock,
            ids,
        }
    }

    /// Creates a task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails or the
    /// cache could not be invalidated afterwards. In the latter case the task
    /// has been stored.
    pub async fn create(&self, input: CreateTaskInput) -> TaskServiceResult<Task> {
        let task = input.into_task(&self.ids, &*self.clock);
        self.repository
            .create(&task)
            .await
            .inspect_err(|err| {
                error!(
                    task_id = %task.id(),
                    title = task.title(),
                    error = %err,
                    "failed to create task"
                );
            })?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the delete or the cache
    /// invalidation fails.
    pub async fn delete_by_id(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repository
            .delete_by_id(id)
            .await
            .inspect_err(|err| error!(task_id = %id, error = %err, "failed to delete task"))?;
        Ok(())
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn find_by_id(&self, id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await
            .inspect_err(|err| error!(task_id = %id, error = %err, "failed to find task"))?;
        Ok(task)
    }

    /// Retrieves one page of tasks along with the total count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the pagination parameters are
    /// invalid and [`TaskServiceError::Repository`] when either read fails.
    pub async fn find_all(&self, params: PageParams) -> TaskServiceResult<TaskPage> {
        let query = PageQuery::try_from(params).inspect_err(|err| {
            error!(page = params.page, size = params.size, error = %err, "invalid page query");
        })?;

        let items = self
            .repository
            .find_all(query)
            .await
            .inspect_err(|err| {
                error!(page = params.page, size = params.size, error = %err, "failed to list tasks");
            })?;
        let total = self
            .repository
            .count_all()
            .await
            .inspect_err(|err| {
                error!(page = params.page, size = params.size, error = %err, "failed to count tasks");
            })?;

        Ok(TaskPage::new(query, items, total))
    }

    /// Applies a partial update and returns the task as stored afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the task does not exist,
    /// the update fails, or the cache could not be invalidated afterwards.
    pub async fn update(&self, id: TaskId, input: UpdateTaskInput) -> TaskServiceResult<Task> {
        let changes = input.into_changes(id, &*self.clock);
        let task = self
            .repository
            .update(&changes)
            .await
            .inspect_err(|err| {
                error!(task_id = %id, changes = ?changes, error = %err, "failed to update task");
            })?;
        Ok(task)
    }
}
