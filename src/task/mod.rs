//! Task storage with a cache-aside data-access layer.
//!
//! Tasks live in a durable store and are read through a key-value cache that
//! is invalidated on every write. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The cache-aside repository in [`repository`]
//! - The service callers go through in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod repository;
pub mod services;
