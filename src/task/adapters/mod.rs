//! Adapter implementations for task data-access ports.

pub mod memory;
pub mod postgres;
pub mod redis;
