//! Cache-aside task repository.

use super::keys::{self, COUNT_KEY, LIST_BUCKET};
use crate::task::{
    domain::{PageQuery, Task, TaskChanges, TaskId},
    ports::{
        CacheStore, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStore,
        TaskStoreError,
    },
};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Task repository that reads through a cache and invalidates it on writes.
///
/// Reads look up the cache first and fall back to the store on a miss,
/// populating the cache afterwards. A failed populate is logged and ignored; a
/// failed lookup is returned to the caller without consulting the store.
///
/// Writes go to the store first and then delete every affected cache entry.
/// The two steps are not atomic: when the store write commits but the delete
/// fails, the operation reports [`TaskRepositoryError::Cache`] even though the
/// data is persisted.
///
/// List pages share one hash bucket, so any write drops every cached page.
/// The repository holds no mutable state and takes no locks.
#[derive(Debug, Clone)]
pub struct CachedTaskRepository<S, C> {
    store: Arc<S>,
    cache: Arc<C>,
}

impl<S, C> CachedTaskRepository<S, C>
where
    S: TaskStore,
    C: CacheStore,
{
    /// Creates a repository over the given store and cache.
    #[must_use]
    pub const fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self { store, cache }
    }

    async fn read_task(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let key = keys::task_key(id);
        let cached = self
            .cache
            .get(&key)
            .await
            .inspect_err(|err| {
                error!(task_id = %id, key = %key, error = %err, "cache lookup failed");
            })?;
        if let Some(task) = decode_cached::<Task>(&key, cached)? {
            debug!(task_id = %id, "task cache hit");
            return Ok(task);
        }

        debug!(task_id = %id, "task cache miss");
        let task = self
            .store
            .find_by_id(id)
            .await
            .map_err(|err| store_failure("find_by_id", err))?;
        self.populate(&key, &task).await;
        Ok(task)
    }

    async fn populate<T>(&self, key: &str, value: &T)
    where
        T: Serialize + Sync,
    {
        let Some(encoded) = encode_for_cache(key, value) else {
            return;
        };
        if let Err(err) = self.cache.set(key, &encoded).await {
            warn!(key = %key, error = %err, "failed to populate cache");
        }
    }

    async fn populate_field<T>(&self, hash: &str, field: &str, value: &T)
    where
        T: Serialize + Sync,
    {
        let Some(encoded) = encode_for_cache(field, value) else {
            return;
        };
        if let Err(err) = self.cache.hash_set(hash, field, &encoded).await {
            warn!(hash = %hash, field = %field, error = %err, "failed to populate cache");
        }
    }

    async fn invalidate(&self, cache_keys: Vec<String>) -> TaskRepositoryResult<()> {
        self.cache.delete(&cache_keys).await.map_err(|err| {
            error!(
                keys = ?cache_keys,
                error = %err,
                "cache invalidation failed after committed write"
            );
            TaskRepositoryError::from(err)
        })
    }
}

#[async_trait]
impl<S, C> TaskRepository for CachedTaskRepository<S, C>
where
    S: TaskStore,
    C: CacheStore,
{
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.store
            .create(task)
            .await
            .map_err(|err| store_failure("create", err))?;
        self.invalidate(vec![LIST_BUCKET.to_owned(), COUNT_KEY.to_owned()])
            .await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.store
            .delete_by_id(id)
            .await
            .map_err(|err| store_failure("delete_by_id", err))?;
        self.invalidate(vec![
            keys::task_key(id),
            LIST_BUCKET.to_owned(),
            COUNT_KEY.to_owned(),
        ])
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.read_task(id).await
    }

    async fn find_all(&self, query: PageQuery) -> TaskRepositoryResult<Vec<Task>> {
        let field = keys::page_field(query);
        let cached = self
            .cache
            .hash_get(LIST_BUCKET, &field)
            .await
            .inspect_err(|err| error!(field = %field, error = %err, "cache lookup failed"))?;
        if let Some(tasks) = decode_cached::<Vec<Task>>(&field, cached)? {
            debug!(page = query.page(), size = query.size(), "task page cache hit");
            return Ok(tasks);
        }

        debug!(page = query.page(), size = query.size(), "task page cache miss");
        let tasks = self
            .store
            .find_all(query)
            .await
            .map_err(|err| store_failure("find_all", err))?;
        self.populate_field(LIST_BUCKET, &field, &tasks).await;
        Ok(tasks)
    }

    async fn count_all(&self) -> TaskRepositoryResult<i64> {
        let cached = self
            .cache
            .get(COUNT_KEY)
            .await
            .inspect_err(|err| error!(key = COUNT_KEY, error = %err, "cache lookup failed"))?;
        if let Some(count) = decode_cached::<i64>(COUNT_KEY, cached)? {
            return Ok(count);
        }

        let count = self
            .store
            .count_all()
            .await
            .map_err(|err| store_failure("count_all", err))?;
        self.populate(COUNT_KEY, &count).await;
        Ok(count)
    }

    async fn update(&self, changes: &TaskChanges) -> TaskRepositoryResult<Task> {
        let id = changes.id;
        self.store
            .update(changes)
            .await
            .map_err(|err| store_failure("update", err))?;
        self.invalidate(vec![
            LIST_BUCKET.to_owned(),
            COUNT_KEY.to_owned(),
            keys::task_key(id),
        ])
        .await?;
        self.read_task(id).await
    }
}

/// Decodes a cached value, treating an absent or empty value as a miss.
fn decode_cached<T>(key: &str, cached: Option<String>) -> TaskRepositoryResult<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = cached.filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|err| {
        error!(key = %key, error = %err, "cached value could not be decoded");
        TaskRepositoryError::decode(key, err)
    })
}

fn encode_for_cache<T>(key: &str, value: &T) -> Option<String>
where
    T: Serialize,
{
    serde_json::to_string(value)
        .inspect_err(|err| {
            warn!(key = %key, error = %err, "value could not be encoded for cache");
        })
        .ok()
}

fn store_failure(operation: &'static str, err: TaskStoreError) -> TaskRepositoryError {
    match &err {
        TaskStoreError::NotFound(id) => debug!(operation, task_id = %id, "task not found in store"),
        TaskStoreError::Persistence(_) => error!(operation, error = %err, "task store failure"),
    }
    TaskRepositoryError::from(err)
}
