//! Cachet: task storage behind a cache-aside data-access layer.
//!
//! This crate stores task records in a durable relational store and
//! amortizes repeated reads through a key-value cache that is invalidated on
//! every write.
//!
//! # Architecture
//!
//! Cachet follows hexagonal architecture principles:
//!
//! - **Domain**: Task records and their input shapes, free of infrastructure
//! - **Ports**: Abstract trait interfaces for the store, the cache, and the
//!   repository
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, Redis,
//!   in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task domain, ports, adapters, repository, and service
//! - [`config`]: Process configuration from defaults, TOML, and environment
//! - [`telemetry`]: Structured logging setup
//! - [`bootstrap`]: Wiring adapters into a ready service

pub mod bootstrap;
pub mod config;
pub mod task;
pub mod telemetry;
