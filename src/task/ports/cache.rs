//! Key-value cache port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for cache store operations.
pub type CacheStoreResult<T> = Result<T, CacheStoreError>;

/// Minimal key-value and hash-field cache contract.
///
/// Values never expire; they live until deleted or overwritten.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads a value. Returns `None` on a miss.
    async fn get(&self, key: &str) -> CacheStoreResult<Option<String>>;

    /// Writes a value, overwriting any previous one.
    async fn set(&self, key: &str, value: &str) -> CacheStoreResult<()>;

    /// Removes zero or more keys. Absent keys are not an error.
    async fn delete(&self, keys: &[String]) -> CacheStoreResult<()>;

    /// Reads one field of a hash bucket. Returns `None` on a miss.
    async fn hash_get(&self, hash: &str, field: &str) -> CacheStoreResult<Option<String>>;

    /// Writes one field of a hash bucket.
    async fn hash_set(&self, hash: &str, field: &str, value: &str) -> CacheStoreResult<()>;
}

/// Errors returned by cache store implementations.
#[derive(Debug, Clone, Error)]
pub enum CacheStoreError {
    /// The cache could not be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The cache rejected or failed the command.
    #[error("cache backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl CacheStoreError {
    /// Wraps a transport failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a command failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
