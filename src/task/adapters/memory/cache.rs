//! In-memory cache store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::task::ports::{CacheStore, CacheStoreError, CacheStoreResult};

/// Thread-safe in-memory cache with plain keys and hash buckets.
///
/// Plain keys and hash buckets share one namespace for deletion, as in Redis:
/// deleting a key removes either kind of entry. The store can be marked
/// unavailable, after which every operation fails with
/// [`CacheStoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct InMemoryCacheStore {
    state: Arc<RwLock<InMemoryCacheState>>,
    available: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct InMemoryCacheState {
    values: HashMap<String, String>,
    hashes: HashMap<String, HashMap<String, String>>,
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self {
            state: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryCacheStore {
    /// Creates an empty, available cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches simulated availability on or off.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns `true` when a plain key or hash bucket with this name exists.
    ///
    /// Ignores simulated availability.
    ///
    /// # Errors
    ///
    /// Returns [`CacheStoreError::Backend`] when the lock is poisoned.
    pub fn contains_key(&self, key: &str) -> CacheStoreResult<bool> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.values.contains_key(key) || state.hashes.contains_key(key))
    }

    fn ensure_available(&self) -> CacheStoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CacheStoreError::unavailable(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "in-memory cache marked unavailable",
            )))
        }
    }
}

fn lock_poisoned(err: impl Display) -> CacheStoreError {
    CacheStoreError::backend(io::Error::other(err.to_string()))
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> CacheStoreResult<Option<String>> {
        self.ensure_available()?;
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CacheStoreResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.hashes.remove(key);
        state.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheStoreResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write().map_err(lock_poisoned)?;
        for key in keys {
            state.values.remove(key);
            state.hashes.remove(key);
        }
        Ok(())
    }

    async fn hash_get(&self, hash: &str, field: &str) -> CacheStoreResult<Option<String>> {
        self.ensure_available()?;
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .hashes
            .get(hash)
            .and_then(|fields| fields.get(field))
            .cloned())
    }

    async fn hash_set(&self, hash: &str, field: &str, value: &str) -> CacheStoreResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.values.remove(hash);
        state
            .hashes
            .entry(hash.to_owned())
            .or_default()
            .insert(field.to_owned(), value.to_owned());
        Ok(())
    }
}
