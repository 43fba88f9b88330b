//! Wall-clock adapter.

use authsim_application::Clock;
use chrono::{DateTime, Utc};

/// [`Clock`] implementation backed by the operating system time.
///
/// Use this in demos and live development; tests should prefer
/// [`ManualClock`](authsim_application::ManualClock).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
