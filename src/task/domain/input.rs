//! Creation and update payloads accepted from callers.

use super::{Task, TaskChanges, TaskId, TaskIdGenerator};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskInput {
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Todo text.
    #[serde(default)]
    pub todo: String,
    /// Initial completion flag.
    #[serde(default)]
    pub completed: bool,
}

impl CreateTaskInput {
    /// Creates a payload with the given title and todo text.
    #[must_use]
    pub fn new(title: impl Into<String>, todo: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            todo: todo.into(),
            completed: false,
        }
    }

    /// Sets the initial completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Converts the payload into a new task with a freshly issued identifier.
    #[must_use]
    pub fn into_task(self, ids: &TaskIdGenerator, clock: &impl Clock) -> Task {
        let id = ids.next_id(clock);
        Task::new(id, self.title, self.todo, self.completed, clock)
    }
}

/// Payload for updating a task.
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New todo text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTaskInput {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new todo text.
    #[must_use]
    pub fn with_todo(mut self, todo: impl Into<String>) -> Self {
        self.todo = Some(todo.into());
        self
    }

    /// Sets the new completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Binds the payload to a task identifier and stamps the update time.
    #[must_use]
    pub fn into_changes(self, id: TaskId, clock: &impl Clock) -> TaskChanges {
        TaskChanges {
            id,
            title: self.title,
            todo: self.todo,
            completed: self.completed,
            updated_at: clock.utc(),
        }
    }
}
