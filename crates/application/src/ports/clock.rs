//! Clock port for time-related operations

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Port for getting the current time.
///
/// All expiry decisions go through this trait, so tests and demos can
/// move time by hand instead of waiting for it to pass.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// A clock that only moves when told to.
///
/// This is the deterministic counterpart to the system clock adapter:
/// the whole crate exists for dev/test environments, so the manual
/// clock is part of the public API rather than test-only scaffolding.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a manual clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }

    /// Jumps the clock to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
