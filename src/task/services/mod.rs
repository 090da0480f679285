//! Application services for task operations.

mod task;

pub use task::{TaskService, TaskServiceError, TaskServiceResult};
