//! `PostgreSQL` store implementation for task rows.

use super::{
    models::{NewTaskRow, TaskChangesRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PageQuery, PersistedTaskData, Task, TaskChanges, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
///
/// Deletes are hard deletes; `deleted_at` is carried for schema compatibility
/// and stays `NULL` for rows written by this store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn create(&self, task: &Task) -> TaskStoreResult<()> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(tasks::table.find(id.value())).execute(tx)?;
                    Ok(())
                })
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Task> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).ok_or(TaskStoreError::NotFound(id))
        })
        .await
    }

    async fn find_all(&self, query: PageQuery) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::id.desc())
                .offset(query.offset())
                .limit(query.size())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn count_all(&self) -> TaskStoreResult<i64> {
        self.run_blocking(move |connection| {
            tasks::table
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn update(&self, changes: &TaskChanges) -> TaskStoreResult<Task> {
        let id = changes.id;
        let changes_row = to_changes_row(changes);
        self.run_blocking(move |connection| {
            let row = connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::update(tasks::table.find(id.value()))
                        .set(&changes_row)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(tx)
                        .optional()
                })
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).ok_or(TaskStoreError::NotFound(id))
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().value(),
        title: task.title().to_owned(),
        todo: task.todo().to_owned(),
        completed: task.completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changes_row(changes: &TaskChanges) -> TaskChangesRow {
    TaskChangesRow {
        title: changes.title.clone(),
        todo: changes.todo.clone(),
        completed: changes.completed,
        updated_at: changes.updated_at,
    }
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        title,
        todo,
        completed,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        todo,
        completed,
        created_at,
        updated_at,
        deleted_at,
    })
}
