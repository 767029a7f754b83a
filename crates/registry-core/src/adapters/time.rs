//! # Time Sources
//!
//! `TimeSource` adapters: the wall clock for real hosts, a fixed clock
//! for deterministic tests.

use crate::domain::value_objects::Timestamp;
use crate::ports::outbound::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// SYSTEM TIME
// =============================================================================

/// Wall-clock time source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Create a wall-clock source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Timestamp::from_secs(secs)
    }
}

// =============================================================================
// FIXED TIME
// =============================================================================

/// Deterministic time source for tests: returns a settable instant.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedTimeSource {
    now: Timestamp,
}

impl FixedTimeSource {
    /// Create a source pinned at `now`.
    #[must_use]
    pub fn at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Move the clock to `now`.
    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Advance the clock by `secs`.
    pub fn advance(&mut self, secs: u64) {
        self.now = Timestamp::from_secs(self.now.as_secs() + secs);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.now
    }
}

// =============================================================================
// TESTS
// =============================================================================
