//! Wait configuration.
//!
//! Per Iron Lotus Framework: Configuration is validated at load time (Poka-Yoke),
//! with sensible defaults and clear error messages.
//!
//! There is no process-wide default wait time. A [`WaitConfig`] is a plain
//! value that callers pass to every assertion they make, overriding the
//! timeout per call with [`WaitConfig::with_timeout`] where one check needs
//! longer (or shorter) than the rest.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::assertion::RetryingAssertion;
use crate::clock::Clock;
use crate::error::{Result, WaitError};
use crate::types::{PollInterval, TimeoutBudget};

/// Timeout budget and poll interval for retrying assertions.
///
/// ```toml
/// timeout = "2s"
/// poll_interval = "50ms"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// How long an assertion may poll before giving up.
    #[serde(default = "default_timeout")]
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Delay between polls.
    #[serde(default = "default_poll_interval")]
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(50)
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl WaitConfig {
    /// Creates a configuration from explicit durations.
    ///
    /// # Errors
    /// Returns an error if `poll_interval` is zero.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Result<Self> {
        let config = Self {
            timeout,
            poll_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration from fractional seconds, as wait times are
    /// commonly written (`2.0`, `0.01`).
    ///
    /// # Errors
    /// Returns an error for a negative or non-finite timeout, or a
    /// non-positive poll interval.
    pub fn from_secs_f64(timeout: f64, poll_interval: f64) -> Result<Self> {
        let budget = TimeoutBudget::from_secs_f64(timeout)?;
        let interval = PollInterval::from_secs_f64(poll_interval)?;
        Ok(Self {
            timeout: budget.as_duration(),
            poll_interval: interval.as_duration(),
        })
    }

    /// Returns a copy with a different timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a copy with a different poll interval.
    ///
    /// # Errors
    /// Returns an error if `poll_interval` is zero.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Result<Self> {
        self.poll_interval = PollInterval::new(poll_interval)?.as_duration();
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        PollInterval::new(self.poll_interval)?;
        Ok(())
    }

    /// Returns the timeout as a budget.
    #[must_use]
    pub const fn budget(&self) -> TimeoutBudget {
        TimeoutBudget::new(self.timeout)
    }

    /// Returns the validated poll interval.
    ///
    /// # Errors
    /// Returns an error if the poll interval is zero.
    pub fn interval(&self) -> Result<PollInterval> {
        PollInterval::new(self.poll_interval)
    }

    /// Builds a retrying assertion on `clock` from this configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn assertion<C: Clock>(&self, clock: C) -> Result<RetryingAssertion<C>> {
        Ok(RetryingAssertion::with_clock(
            self.budget(),
            self.interval()?,
            clock,
        ))
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text cannot be parsed or is invalid.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| WaitError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns [`WaitError::Io`] if the file cannot be read, or
    /// [`WaitError::Config`] if it cannot be parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }
}

/// Serde helper for humantime durations.
pub(crate) mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serializes a duration as a human-readable string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    /// Deserializes a duration from a human-readable string.
    ///
    /// # Errors
    /// Returns an error if the string cannot be parsed.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
