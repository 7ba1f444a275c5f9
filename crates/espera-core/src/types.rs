//! Core value types: timeout budgets, poll intervals and poll outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{Result, WaitError};

/// Maximum time an assertion may spend polling.
///
/// Immutable for the life of one assertion invocation. A zero budget is
/// allowed and means "check exactly once".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeoutBudget(Duration);

impl TimeoutBudget {
    /// Creates a budget from a duration.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Creates a budget from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    /// Creates a budget from (possibly fractional) seconds.
    ///
    /// # Errors
    /// Returns [`WaitError::InvalidConfiguration`] for negative, non-finite
    /// or out-of-range values.
    pub fn from_secs_f64(secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(WaitError::invalid(format!(
                "timeout budget must be a non-negative number of seconds, got {secs}"
            )));
        }
        Duration::try_from_secs_f64(secs)
            .map(Self)
            .map_err(|e| WaitError::invalid(format!("timeout budget of {secs} seconds: {e}")))
    }

    /// Returns the budget as a duration.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }
}

impl From<Duration> for TimeoutBudget {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

/// Delay between two polls. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PollInterval(Duration);

impl PollInterval {
    /// Creates a poll interval.
    ///
    /// # Errors
    /// Returns [`WaitError::InvalidConfiguration`] if `duration` is zero.
    pub fn new(duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(WaitError::invalid("poll interval must be greater than zero"));
        }
        Ok(Self(duration))
    }

    /// Creates a poll interval from milliseconds.
    ///
    /// # Errors
    /// Returns [`WaitError::InvalidConfiguration`] if `ms` is zero.
    pub fn from_millis(ms: u64) -> Result<Self> {
        Self::new(Duration::from_millis(ms))
    }

    /// Creates a poll interval from (possibly fractional) seconds.
    ///
    /// # Errors
    /// Returns [`WaitError::InvalidConfiguration`] for non-positive,
    /// non-finite or out-of-range values.
    pub fn from_secs_f64(secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(WaitError::invalid(format!(
                "poll interval must be a positive number of seconds, got {secs}"
            )));
        }
        let duration = Duration::try_from_secs_f64(secs)
            .map_err(|e| WaitError::invalid(format!("poll interval of {secs} seconds: {e}")))?;
        Self::new(duration)
    }

    /// Returns the interval as a duration.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }
}

impl TryFrom<Duration> for PollInterval {
    type Error = WaitError;

    fn try_from(duration: Duration) -> Result<Self> {
        Self::new(duration)
    }
}

/// Which kind of poll loop produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PollMode {
    /// Wait until the predicate holds.
    Eventually,
    /// Require the predicate to stay false for the whole budget.
    Never,
}

impl fmt::Display for PollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eventually => write!(f, "eventually"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Result of running one retrying assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOutcome {
    /// Poll loop that produced this outcome.
    pub mode: PollMode,
    /// Whether the assertion held.
    pub succeeded: bool,
    /// Time from the first poll to the deciding poll.
    #[serde(with = "crate::config::humantime_serde")]
    pub elapsed: Duration,
    /// Number of predicate evaluations.
    pub poll_count: u32,
}

impl PollOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub const fn success(mode: PollMode, elapsed: Duration, poll_count: u32) -> Self {
        Self {
            mode,
            succeeded: true,
            elapsed,
            poll_count,
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub const fn failure(mode: PollMode, elapsed: Duration, poll_count: u32) -> Self {
        Self {
            mode,
            succeeded: false,
            elapsed,
            poll_count,
        }
    }

    /// Converts a failed outcome into the matching assertion error.
    ///
    /// `what` describes the condition and ends up in the failure message.
    ///
    /// # Errors
    /// Returns [`WaitError::TimeoutExceeded`] for a failed `Eventually` loop
    /// and [`WaitError::ConditionObserved`] for a failed `Never` loop.
    pub fn into_result(self, what: impl Into<String>) -> Result<Self> {
        if self.succeeded {
            return Ok(self);
        }
        let what = what.into();
        Err(match self.mode {
            PollMode::Eventually => WaitError::TimeoutExceeded {
                what,
                elapsed: self.elapsed,
                polls: self.poll_count,
            },
            PollMode::Never => WaitError::ConditionObserved {
                what,
                elapsed: self.elapsed,
                polls: self.poll_count,
            },
        })
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} in {} after {} polls",
            self.mode,
            if self.succeeded { "passed" } else { "failed" },
            humantime::format_duration(self.elapsed),
            self.poll_count
        )
    }
}
