//! Cache-aside data access for tasks.
//!
//! [`CachedTaskRepository`] decides, for every read and write, what to fetch
//! from or invalidate in the cache versus the durable store. Cache keys are
//! derived deterministically by [`keys`].

mod cached;
pub mod keys;

pub use cached::CachedTaskRepository;
