//! Redis cache store.
//!
//! | Port operation | Redis command |
//! |---|---|
//! | `get` | `GET` |
//! | `set` | `SET` (no expiry) |
//! | `delete` | `DEL` |
//! | `hash_get` | `HGET` |
//! | `hash_set` | `HSET` |

use ::redis::aio::ConnectionManager;
use ::redis::{Client, RedisError};
use async_trait::async_trait;
use tracing::debug;

use crate::task::ports::{CacheStore, CacheStoreError, CacheStoreResult};

/// Redis-backed cache store.
///
/// Holds a [`ConnectionManager`], which multiplexes commands over one
/// connection and reconnects automatically; clones share the connection.
#[derive(Clone)]
pub struct RedisCacheStore {
    connection: ConnectionManager,
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("connection", &"ConnectionManager")
            .finish()
    }
}

impl RedisCacheStore {
    /// Connects to Redis at the given URL.
    ///
    /// The URL format is `redis://[:<password>@]<host>:<port>[/<db>]`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheStoreError::Backend`] when the URL is malformed and
    /// [`CacheStoreError::Unavailable`] when the connection cannot be made.
    pub async fn connect(url: &str) -> CacheStoreResult<Self> {
        let client = Client::open(url).map_err(CacheStoreError::backend)?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(CacheStoreError::unavailable)?;
        debug!("redis cache store connected");
        Ok(Self::with_connection(connection))
    }

    /// Wraps an existing connection manager.
    #[must_use]
    pub const fn with_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

/// Separates transport failures from command failures.
fn map_redis_error(err: RedisError) -> CacheStoreError {
    if err.is_io_error() || err.is_connection_dropped() || err.is_timeout() {
        CacheStoreError::unavailable(err)
    } else {
        CacheStoreError::backend(err)
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> CacheStoreResult<Option<String>> {
        let mut connection = self.connection.clone();
        ::redis::cmd("GET")
            .arg(key)
            .query_async::<Option<String>>(&mut connection)
            .await
            .map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &str) -> CacheStoreResult<()> {
        let mut connection = self.connection.clone();
        ::redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async::<()>(&mut connection)
            .await
            .map_err(map_redis_error)
    }

    async fn delete(&self, keys: &[String]) -> CacheStoreResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut connection = self.connection.clone();
        ::redis::cmd("DEL")
            .arg(keys)
            .query_async::<()>(&mut connection)
            .await
            .map_err(map_redis_error)
    }

    async fn hash_get(&self, hash: &str, field: &str) -> CacheStoreResult<Option<String>> {
        let mut connection = self.connection.clone();
        ::redis::cmd("HGET")
            .arg(hash)
            .arg(field)
            .query_async::<Option<String>>(&mut connection)
            .await
            .map_err(map_redis_error)
    }

    async fn hash_set(&self, hash: &str, field: &str, value: &str) -> CacheStoreResult<()> {
        let mut connection = self.connection.clone();
        ::redis::cmd("HSET")
            .arg(hash)
            .arg(field)
            .arg(value)
            .query_async::<()>(&mut connection)
            .await
            .map_err(map_redis_error)
    }
}
