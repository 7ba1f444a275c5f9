//! Error types for espera-core.
//!
//! Per Iron Lotus Framework: All errors are explicit, no panics allowed.
//!
//! A failed poll loop is a *reportable* condition: the loop itself returns a
//! [`PollOutcome`](crate::PollOutcome) and only [`PollOutcome::into_result`]
//! turns it into one of the failure variants below. Configuration problems
//! are fatal and surface before the first poll.
//!
//! [`PollOutcome::into_result`]: crate::PollOutcome::into_result

use std::time::Duration;

/// Result type alias for retrying assertion operations.
pub type Result<T> = std::result::Result<T, WaitError>;

/// Error type for retrying assertions.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// Timeout budget or poll interval is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The condition never held within the timeout budget.
    #[error(
        "timed out waiting for {what} after {} ({polls} polls)",
        fmt_elapsed(.elapsed)
    )]
    TimeoutExceeded {
        /// Description of the awaited condition.
        what: String,
        /// Time spent polling.
        elapsed: Duration,
        /// Number of predicate evaluations.
        polls: u32,
    },

    /// A condition that had to stay false was observed true.
    #[error(
        "observed {what} after {} ({polls} polls)",
        fmt_elapsed(.elapsed)
    )]
    ConditionObserved {
        /// Description of the forbidden condition.
        what: String,
        /// Time at which the condition was first observed.
        elapsed: Duration,
        /// Number of predicate evaluations.
        polls: u32,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn fmt_elapsed(elapsed: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*elapsed)
}

impl WaitError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates a configuration load error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this error reports a failed assertion rather than a fault.
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(
            self,
            Self::TimeoutExceeded { .. } | Self::ConditionObserved { .. }
        )
    }

    /// Returns the elapsed time and poll count for assertion failures.
    #[must_use]
    pub const fn poll_stats(&self) -> Option<(Duration, u32)> {
        match self {
            Self::TimeoutExceeded { elapsed, polls, .. }
            | Self::ConditionObserved { elapsed, polls, .. } => Some((*elapsed, *polls)),
            _ => None,
        }
    }
}
