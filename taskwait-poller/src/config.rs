//! Poll configuration
//!
//! Defines the cadence, the overall budget and the terminality policy of a
//! poll session.

use std::time::Duration;
use thiserror::Error;

use crate::policy::TerminalPolicy;

/// Invalid poll configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than 0")]
    Zero(&'static str),

    #[error("first_check_delay ({first_check_delay:?}) must be shorter than interval ({interval:?})")]
    FirstCheckTooLate {
        first_check_delay: Duration,
        interval: Duration,
    },
}

/// Poll session configuration
///
/// Defaults follow the notifications API: a first check 100 ms after start,
/// then one every 5 s, giving up after 45 s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Cadence of the periodic check, measured from session start
    pub interval: Duration,

    /// Wall-clock budget of the whole session
    pub timeout: Duration,

    /// Delay before the first check
    pub first_check_delay: Duration,

    /// Budget of a single fetch; `None` leaves a fetch bounded only by `timeout`
    pub fetch_timeout: Option<Duration>,

    /// How a terminal snapshot with a failure status is judged
    pub policy: TerminalPolicy,
}

impl PollConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);
    pub const DEFAULT_FIRST_CHECK_DELAY: Duration = Duration::from_millis(100);

    /// Creates a configuration with defaults
    pub fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
            first_check_delay: Self::DEFAULT_FIRST_CHECK_DELAY,
            fetch_timeout: None,
            policy: TerminalPolicy::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_first_check_delay(mut self, delay: Duration) -> Self {
        self.first_check_delay = delay;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Option<Duration>) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn with_policy(mut self, policy: TerminalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::Zero("interval"));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Zero("timeout"));
        }

        // First check is never delay-zero.
        if self.first_check_delay.is_zero() {
            return Err(ConfigError::Zero("first_check_delay"));
        }

        if self.first_check_delay >= self.interval {
            return Err(ConfigError::FirstCheckTooLate {
                first_check_delay: self.first_check_delay,
                interval: self.interval,
            });
        }

        if self.fetch_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::Zero("fetch_timeout"));
        }

        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}
