//! Session lifecycle configuration.

use std::time::Duration;

/// Tunable lifecycle constants for a simulated session.
///
/// The defaults model a typical web client: a one-minute access token
/// renewed by a 24-hour refresh token, a half-second simulated round
/// trip, and a monitor that polls twice per access-token lifetime.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Access token time-to-live in seconds.
    pub access_token_ttl_seconds: i64,
    /// Refresh token time-to-live in seconds.
    pub refresh_token_ttl_seconds: i64,
    /// Simulated latency for login and refresh round trips.
    pub call_latency: Duration,
    /// Interval between expiry-monitor ticks. Keep this shorter than
    /// the access-token TTL or the monitor cannot catch expiry in time.
    pub poll_interval: Duration,
}

impl SessionConfig {
    /// Creates a configuration with the default constants.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            access_token_ttl_seconds: 60,
            refresh_token_ttl_seconds: 86_400,
            call_latency: Duration::from_millis(500),
            poll_interval: Duration::from_secs(30),
        }
    }

    /// Sets the access token TTL.
    #[must_use]
    pub const fn with_access_token_ttl(mut self, seconds: i64) -> Self {
        self.access_token_ttl_seconds = seconds;
        self
    }

    /// Sets the refresh token TTL.
    #[must_use]
    pub const fn with_refresh_token_ttl(mut self, seconds: i64) -> Self {
        self.refresh_token_ttl_seconds = seconds;
        self
    }

    /// Sets the simulated round-trip latency.
    #[must_use]
    pub const fn with_call_latency(mut self, latency: Duration) -> Self {
        self.call_latency = latency;
        self
    }

    /// Sets the monitor poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_constants() {
        let config = SessionConfig::default();
        assert_eq!(config.access_token_ttl_seconds, 60);
        assert_eq!(config.refresh_token_ttl_seconds, 86_400);
        assert_eq!(config.call_latency, Duration::from_millis(500));
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = SessionConfig::new()
            .with_access_token_ttl(5)
            .with_refresh_token_ttl(3600)
            .with_call_latency(Duration::ZERO)
            .with_poll_interval(Duration::from_secs(2));

        assert_eq!(config.access_token_ttl_seconds, 5);
        assert_eq!(config.refresh_token_ttl_seconds, 3600);
        assert_eq!(config.call_latency, Duration::ZERO);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }
}
