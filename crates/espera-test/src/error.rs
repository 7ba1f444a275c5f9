//! Test error types.

use espera_core::WaitError;

/// Result type alias for expectation operations.
pub type Result<T> = std::result::Result<T, TestError>;

/// Testing errors.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    /// A single check without waiting did not match.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// Selector could not be parsed.
    #[error("invalid selector '{selector}': {reason}")]
    Selector {
        /// Selector text as written.
        selector: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Fixture is malformed.
    #[error("fixture error: {0}")]
    Fixture(String),

    /// Retrying assertion failed or was misconfigured.
    #[error(transparent)]
    Wait(#[from] WaitError),
}

impl TestError {
    /// Creates an assertion error.
    #[must_use]
    pub fn assertion(msg: impl Into<String>) -> Self {
        Self::Assertion(msg.into())
    }

    /// Creates a selector error.
    #[must_use]
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is a timed-out or violated expectation.
    #[must_use]
    pub const fn is_expectation_failure(&self) -> bool {
        match self {
            Self::Wait(err) => err.is_assertion_failure(),
            Self::Assertion(_) => true,
            _ => false,
        }
    }
}
