//! Identifier types for the task domain.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a task identifier from an existing value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues task identifiers at creation time.
///
/// Identifiers are derived from the clock in microseconds since the Unix epoch
/// and are strictly increasing for a given generator, so ordering by identifier
/// matches creation order. When the clock has not advanced past the last issued
/// value the next identifier is the last one plus one.
#[derive(Debug, Default)]
pub struct TaskIdGenerator {
    last_issued: AtomicI64,
}

impl TaskIdGenerator {
    /// Creates a generator that has not issued any identifier yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_issued: AtomicI64::new(0),
        }
    }

    /// Issues the next identifier.
    #[must_use]
    pub fn next_id(&self, clock: &impl Clock) -> TaskId {
        let candidate = clock.utc().timestamp_micros();
        let mut last = self.last_issued.load(Ordering::Acquire);
        loop {
            let next = candidate.max(last.saturating_add(1));
            match self.last_issued.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return TaskId(next),
                Err(observed) => last = observed,
            }
        }
    }
}
