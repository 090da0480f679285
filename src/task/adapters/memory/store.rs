//! In-memory task store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PageQuery, Task, TaskChanges, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Rows are kept ordered by identifier. Every read operation increments an
/// access counter so tests can tell cache hits from store reads.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    rows: Arc<RwLock<BTreeMap<TaskId, Task>>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many read operations have reached the store.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Returns the number of stored rows without counting as a read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> TaskStoreResult<usize> {
        let rows = self.rows.read().map_err(lock_poisoned)?;
        Ok(rows.len())
    }

    /// Returns `true` when no rows are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> TaskStoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

fn lock_poisoned(err: impl Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, task: &Task) -> TaskStoreResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        if rows.contains_key(&task.id()) {
            return Err(TaskStoreError::persistence(std::io::Error::other(format!(
                "duplicate task identifier: {}",
                task.id()
            ))));
        }
        rows.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        rows.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Task> {
        self.record_read();
        let rows = self.rows.read().map_err(lock_poisoned)?;
        rows.get(&id).cloned().ok_or(TaskStoreError::NotFound(id))
    }

    async fn find_all(&self, query: PageQuery) -> TaskStoreResult<Vec<Task>> {
        self.record_read();
        let offset = usize::try_from(query.offset()).map_err(TaskStoreError::persistence)?;
        let limit = usize::try_from(query.size()).map_err(TaskStoreError::persistence)?;
        let rows = self.rows.read().map_err(lock_poisoned)?;
        Ok(rows.values().rev().skip(offset).take(limit).cloned().collect())
    }

    async fn count_all(&self) -> TaskStoreResult<i64> {
        self.record_read();
        let rows = self.rows.read().map_err(lock_poisoned)?;
        i64::try_from(rows.len()).map_err(TaskStoreError::persistence)
    }

    async fn update(&self, changes: &TaskChanges) -> TaskStoreResult<Task> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        let row = rows
            .get_mut(&changes.id)
            .ok_or(TaskStoreError::NotFound(changes.id))?;
        row.apply(changes);
        Ok(row.clone())
    }
}
