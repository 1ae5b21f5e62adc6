//! Run pacing settings
//!
//! Defaults keep the one-request-at-a-time behavior with no timeout.

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ResilienceConfig {
    pub concurrency: ConcurrencyConfig,
    pub timeout: TimeoutConfig,
}

#[derive(Debug, Clone)]
pub struct ConcurrencyConfig {
    /// Deletes issued concurrently within one run. 1 means strictly sequential.
    pub max_in_flight: usize,
    /// HTTP requests one client may have open, shared by every run using it
    pub max_concurrent_requests: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 1,
            max_concurrent_requests: 8,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimeoutConfig {
    /// Upper bound on a single delete once it is issued. `None` waits forever.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl ResilienceConfig {
    /// Number of deletes a run may keep outstanding, never below 1
    pub fn in_flight_limit(&self) -> usize {
        self.concurrency.max_in_flight.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential_and_untimed() {
        let config = ResilienceConfig::default();

        assert_eq!(config.in_flight_limit(), 1);
        assert_eq!(config.concurrency.max_concurrent_requests, 8);
        assert!(config.timeout.request_timeout.is_none());
        assert!(config.timeout.connect_timeout.is_none());
    }

    #[test]
    fn test_zero_in_flight_is_clamped() {
        let mut config = ResilienceConfig::default();
        config.concurrency.max_in_flight = 0;
        assert_eq!(config.in_flight_limit(), 1);
    }
}
