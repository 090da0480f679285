//! Port contracts for task data access.
//!
//! Ports define infrastructure-agnostic interfaces. [`TaskStore`] and
//! [`CacheStore`] are consumed only by the cache-aside repository, which in
//! turn implements [`TaskRepository`] for the task service.

pub mod cache;
pub mod repository;
pub mod store;

pub use cache::{CacheStore, CacheStoreError, CacheStoreResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};

#[cfg(test)]
pub use cache::MockCacheStore;
#[cfg(test)]
pub use repository::MockTaskRepository;
#[cfg(test)]
pub use store::MockTaskStore;
