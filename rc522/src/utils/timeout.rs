//! Timeout helpers: millisecond conversion and a host-side deadline used to
//! bound register polling loops.

use std::time::{Duration, Instant};

/// Host-side bound on one reader command when the caller does not configure one.
pub const DEFAULT_SAFETY_TIMEOUT_MS: u64 = 50;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// A point in time after which a polling loop gives up.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    end: Instant,
    budget_ms: u64,
}

impl Deadline {
    pub fn after_ms(budget_ms: u64) -> Self {
        Self {
            end: Instant::now() + ms(budget_ms),
            budget_ms,
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.end
    }

    pub fn budget_ms(&self) -> u64 {
        self.budget_ms
    }

    pub fn remaining(&self) -> Duration {
        self.end.saturating_duration_since(Instant::now())
    }
}
