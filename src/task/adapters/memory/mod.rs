//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations of the store and
//! cache ports suitable for tests and embedding without external services.

mod cache;
mod store;

pub use cache::InMemoryCacheStore;
pub use store::InMemoryTaskStore;
