//! Expectation DSL over retrying assertions.
//!
//! ```rust,ignore
//! let page = Timeline::new(clock.clone(), loading_page()).at(ms(200), roster());
//!
//! expect(&page).on_clock(clock).to(has_content("Sharoar Dewshining"))?;
//! ```
//!
//! The four modes differ only in which poll loop runs and what counts as
//! done:
//!
//! | Method | Loop | Returns early when | Waits full budget when |
//! |--------|------|--------------------|------------------------|
//! | [`to`](Expectation::to) | eventually | matcher matches | it never matches |
//! | [`to_not`](Expectation::to_not) | eventually | matcher stops matching | it keeps matching |
//! | [`never`](Expectation::never) | never | matcher matches (failure) | it never matches (success) |
//! | [`now`](Expectation::now) | single check | always | never |
//!
//! `to_not` is the fast inversion: content that is already gone passes on
//! the first poll. `never` is the strict one and always costs the whole
//! budget to pass.

use std::time::Duration;

use espera_core::{Clock, Observable, PollOutcome, SystemClock, WaitConfig};

use crate::error::{Result, TestError};
use crate::matcher::{Matcher, Not};

/// Starts an expectation on `source` with the default [`WaitConfig`] and
/// wall-clock time.
pub fn expect<O: Observable>(source: &O) -> Expectation<'_, O, SystemClock> {
    Expectation {
        source,
        config: WaitConfig::default(),
        clock: SystemClock::new(),
    }
}

/// Pending assertion about an observable source.
#[derive(Debug, Clone)]
pub struct Expectation<'a, O, C> {
    source: &'a O,
    config: WaitConfig,
    clock: C,
}

impl<'a, O: Observable, C: Clock + Clone> Expectation<'a, O, C> {
    /// Uses `config` for timeout and poll interval.
    #[must_use]
    pub fn with_config(mut self, config: WaitConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides only the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Polls on `clock` instead.
    #[must_use]
    pub fn on_clock<C2: Clock + Clone>(self, clock: C2) -> Expectation<'a, O, C2> {
        Expectation {
            source: self.source,
            config: self.config,
            clock,
        }
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &WaitConfig {
        &self.config
    }

    /// Waits until `matcher` matches a snapshot.
    ///
    /// # Errors
    /// [`WaitError::TimeoutExceeded`](espera_core::WaitError::TimeoutExceeded)
    /// if it never does within the budget.
    pub fn to<M: Matcher<O::Snapshot>>(&self, matcher: M) -> Result<PollOutcome> {
        let what = matcher.description();
        let outcome = self
            .config
            .assertion(self.clock.clone())?
            .eventually(|| matcher.matches(&self.source.snapshot()));
        self.finish("to", outcome, what)
    }

    /// Waits until `matcher` stops matching a snapshot.
    ///
    /// # Errors
    /// [`WaitError::TimeoutExceeded`](espera_core::WaitError::TimeoutExceeded)
    /// if it still matches when the budget runs out.
    pub fn to_not<M: Matcher<O::Snapshot>>(&self, matcher: M) -> Result<PollOutcome> {
        self.to(Not(matcher))
    }

    /// Requires `matcher` to match no snapshot for the whole budget.
    ///
    /// # Errors
    /// [`WaitError::ConditionObserved`](espera_core::WaitError::ConditionObserved)
    /// as soon as it matches.
    pub fn never<M: Matcher<O::Snapshot>>(&self, matcher: M) -> Result<PollOutcome> {
        let what = matcher.description();
        let outcome = self
            .config
            .assertion(self.clock.clone())?
            .never(|| matcher.matches(&self.source.snapshot()));
        self.finish("never", outcome, what)
    }

    /// Checks `matcher` against a single snapshot, without waiting.
    ///
    /// # Errors
    /// [`TestError::Assertion`] naming the matcher if it does not match.
    pub fn now<M: Matcher<O::Snapshot>>(&self, matcher: M) -> Result<PollOutcome> {
        let what = matcher.description();
        let outcome = self
            .config
            .with_timeout(Duration::ZERO)
            .assertion(self.clock.clone())?
            .eventually(|| matcher.matches(&self.source.snapshot()));
        if outcome.succeeded {
            return self.finish("now", outcome, what);
        }
        tracing::debug!(verb = "now", matcher = %what, "single check did not match");
        Err(TestError::assertion(format!("expected {what} without waiting")))
    }

    /// Like [`to`](Self::to) but returns whether it matched instead of an error.
    ///
    /// # Errors
    /// Only for an invalid configuration.
    pub fn matches_eventually<M: Matcher<O::Snapshot>>(&self, matcher: M) -> Result<bool> {
        Ok(self
            .config
            .assertion(self.clock.clone())?
            .eventually(|| matcher.matches(&self.source.snapshot()))
            .succeeded)
    }

    fn finish(&self, verb: &str, outcome: PollOutcome, what: String) -> Result<PollOutcome> {
        tracing::debug!(
            verb,
            matcher = %what,
            succeeded = outcome.succeeded,
            elapsed = ?outcome.elapsed,
            polls = outcome.poll_count,
            timeout = ?self.config.timeout,
            "expectation finished"
        );
        outcome.into_result(what).map_err(TestError::from)
    }
}
