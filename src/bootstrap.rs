//! Wiring of concrete adapters into a ready task service.
//!
//! Connections are opened here and handed to the repository explicitly; the
//! caller owns the returned service and, through it, the connection handles.

use crate::config::{AppConfig, PostgresConfig};
use crate::task::{
    adapters::{
        postgres::{PostgresTaskStore, TaskPgPool},
        redis::RedisCacheStore,
    },
    ports::CacheStoreError,
    repository::CachedTaskRepository,
    services::TaskService,
};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Repository type produced by [`connect`].
pub type AppTaskRepository = CachedTaskRepository<PostgresTaskStore, RedisCacheStore>;

/// Service type produced by [`connect`].
pub type AppTaskService = TaskService<AppTaskRepository, DefaultClock>;

/// Errors returned while opening connections.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The `PostgreSQL` pool could not be built.
    #[error("failed to open PostgreSQL pool: {0}")]
    Postgres(Box<dyn std::error::Error + Send + Sync>),

    /// The Redis connection could not be opened.
    #[error("failed to connect to Redis: {0}")]
    Redis(#[from] CacheStoreError),
}

/// Opens the cache and the store described by `config` and wires them into a
/// task service.
///
/// # Errors
///
/// Returns [`BootstrapError`] when either connection cannot be opened.
pub async fn connect(config: &AppConfig) -> Result<AppTaskService, BootstrapError> {
    let cache = RedisCacheStore::connect(&config.redis.url()).await?;
    let pool = connect_postgres(&config.postgres).await?;
    info!(
        postgres_host = %config.postgres.host,
        redis_host = %config.redis.host,
        "task storage connected"
    );

    let repository = CachedTaskRepository::new(
        Arc::new(PostgresTaskStore::new(pool)),
        Arc::new(cache),
    );
    Ok(TaskService::new(Arc::new(repository), Arc::new(DefaultClock)))
}

/// Builds the `PostgreSQL` connection pool.
///
/// Pool construction establishes connections, so it runs on the blocking
/// thread pool.
///
/// # Errors
///
/// Returns [`BootstrapError::Postgres`] when the pool cannot be built.
pub async fn connect_postgres(config: &PostgresConfig) -> Result<TaskPgPool, BootstrapError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    let max_size = config.pool_size();
    tokio::task::spawn_blocking(move || Pool::builder().max_size(max_size).build(manager))
        .await
        .map_err(|err| BootstrapError::Postgres(Box::new(err)))?
        .map_err(|err| BootstrapError::Postgres(Box::new(err)))
}
