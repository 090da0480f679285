//! Domain model for task records.
//!
//! The task domain models the record, its creation and update payloads, and
//! pagination while keeping storage and caching concerns outside of the domain
//! boundary.

mod error;
mod ids;
mod input;
mod page;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskIdGenerator};
pub use input::{CreateTaskInput, UpdateTaskInput};
pub use page::{PageParams, PageQuery, TaskPage};
pub use task::{PersistedTaskData, Task, TaskChanges};
