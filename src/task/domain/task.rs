//! Task record and the change set applied by updates.

use super::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task record.
///
/// The JSON form of this type is also the representation held in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    todo: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted todo text.
    pub todo: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted deletion boundary, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Partial update for an existing task.
///
/// Fields left as `None` keep their stored value. `updated_at` is always
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// Identifier of the task to update.
    pub id: TaskId,
    /// New title, if changed.
    pub title: Option<String>,
    /// New todo text, if changed.
    pub todo: Option<String>,
    /// New completion flag, if changed.
    pub completed: Option<bool>,
    /// Timestamp of the update.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task stamped with the current clock time.
    #[must_use]
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        todo: impl Into<String>,
        completed: bool,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title: title.into(),
            todo: todo.into(),
            completed,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            todo: data.todo,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the todo text.
    #[must_use]
    pub fn todo(&self) -> &str {
        &self.todo
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the deletion boundary, if the store recorded one.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Applies a partial update in place.
    ///
    /// The identifier is never changed, even if `changes.id` differs.
    pub fn apply(&mut self, changes: &TaskChanges) {
        if let Some(title) = &changes.title {
            self.title.clone_from(title);
        }
        if let Some(todo) = &changes.todo {
            self.todo.clone_from(todo);
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = changes.updated_at;
    }
}
