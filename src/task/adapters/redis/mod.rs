//! Redis adapter for the task cache.

mod cache;

pub use cache::RedisCacheStore;
