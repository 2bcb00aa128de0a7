//! Time sources for issuance and expiry checks
//!
//! Every time-dependent operation takes its "now" from a [`Clock`], so tests
//! and callers can pin time instead of reading the wall clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current Unix timestamp in seconds
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| std::time::Duration::from_secs(0))
            .as_secs() as i64
    }
}

/// Clock frozen at a fixed timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl FixedClock {
    /// A new clock `seconds` later than this one
    pub fn advance(self, seconds: i64) -> Self {
        FixedClock(self.0.saturating_add(seconds))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> i64 {
        (**self).now()
    }
}
