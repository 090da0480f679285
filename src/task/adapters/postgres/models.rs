//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Todo text.
    pub todo: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Deletion boundary, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Todo text.
    pub todo: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update model; `None` fields are left out of the `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangesRow {
    /// New title, if changed.
    pub title: Option<String>,
    /// New todo text, if changed.
    pub todo: Option<String>,
    /// New completion flag, if changed.
    pub completed: Option<bool>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}
