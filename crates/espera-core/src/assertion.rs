//! The retrying assertion poll loop.
//!
//! # Toyota Way: Genchi Genbutsu (現地現物)
//! Go and see: the predicate is re-observed on every poll instead of trusting
//! one early look at state that is still changing.
//!
//! Both loops evaluate the predicate immediately, then sleep one poll
//! interval between evaluations. The last sleep is clamped to what remains
//! of the budget, so the final poll lands on the deadline and
//! `elapsed <= budget + interval` always holds.

use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::types::{PollInterval, PollMode, PollOutcome, TimeoutBudget};

/// Polls a predicate until it holds (or must stop holding) within a budget.
///
/// Created per invocation; consumed by [`eventually`](Self::eventually) or
/// [`never`](Self::never).
#[derive(Debug)]
pub struct RetryingAssertion<C: Clock = SystemClock> {
    budget: TimeoutBudget,
    interval: PollInterval,
    clock: C,
}

impl RetryingAssertion<SystemClock> {
    /// Creates an assertion on wall-clock time.
    #[must_use]
    pub fn new(budget: TimeoutBudget, interval: PollInterval) -> Self {
        Self::with_clock(budget, interval, SystemClock::new())
    }
}

impl<C: Clock> RetryingAssertion<C> {
    /// Creates an assertion on the given clock.
    #[must_use]
    pub const fn with_clock(budget: TimeoutBudget, interval: PollInterval, clock: C) -> Self {
        Self {
            budget,
            interval,
            clock,
        }
    }

    /// Returns the timeout budget.
    #[must_use]
    pub const fn budget(&self) -> TimeoutBudget {
        self.budget
    }

    /// Returns the poll interval.
    #[must_use]
    pub const fn interval(&self) -> PollInterval {
        self.interval
    }

    /// Succeeds as soon as `predicate` returns true; fails once the budget
    /// is spent without a true observation.
    pub fn eventually<P>(self, predicate: P) -> PollOutcome
    where
        P: FnMut() -> bool,
    {
        self.run(PollMode::Eventually, predicate)
    }

    /// Succeeds if `predicate` stays false for the whole budget; fails on
    /// the first true observation without waiting out the rest.
    pub fn never<P>(self, predicate: P) -> PollOutcome
    where
        P: FnMut() -> bool,
    {
        self.run(PollMode::Never, predicate)
    }

    /// A true observation settles the outcome early: success for
    /// `Eventually`, failure for `Never`.
    fn run(self, mode: PollMode, mut predicate: impl FnMut() -> bool) -> PollOutcome {
        let budget = self.budget.as_duration();
        let start = self.clock.now();
        let mut polls: u32 = 0;

        loop {
            polls = polls.saturating_add(1);
            let hit = predicate();
            let elapsed = self.clock.now().saturating_sub(start);

            if hit {
                tracing::debug!(%mode, polls, elapsed = ?elapsed, "predicate observed true");
                return match mode {
                    PollMode::Eventually => PollOutcome::success(mode, elapsed, polls),
                    PollMode::Never => PollOutcome::failure(mode, elapsed, polls),
                };
            }

            if elapsed >= budget {
                return match mode {
                    PollMode::Eventually => {
                        tracing::warn!(
                            polls,
                            elapsed = ?elapsed,
                            budget = ?budget,
                            "timeout budget exhausted"
                        );
                        PollOutcome::failure(mode, elapsed, polls)
                    }
                    PollMode::Never => {
                        tracing::debug!(polls, elapsed = ?elapsed, "predicate stayed false for the budget");
                        PollOutcome::success(mode, elapsed, polls)
                    }
                };
            }

            let remaining = budget.saturating_sub(elapsed);
            self.clock.sleep(self.interval.as_duration().min(remaining));
        }
    }
}

/// Polls `predicate` on wall-clock time until it holds or `timeout` is spent.
///
/// A failed outcome is returned as `Ok` with `succeeded == false`; use
/// [`PollOutcome::into_result`] to turn it into an error.
///
/// # Errors
/// Returns [`WaitError::InvalidConfiguration`](crate::WaitError::InvalidConfiguration)
/// if `poll_interval` is zero. The predicate is not called in that case.
pub fn assert_eventually<P>(
    predicate: P,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<PollOutcome>
where
    P: FnMut() -> bool,
{
    let interval = PollInterval::new(poll_interval)?;
    Ok(RetryingAssertion::new(TimeoutBudget::new(timeout), interval).eventually(predicate))
}

/// Requires `predicate` to stay false on wall-clock time for all of `timeout`.
///
/// # Errors
/// Returns [`WaitError::InvalidConfiguration`](crate::WaitError::InvalidConfiguration)
/// if `poll_interval` is zero. The predicate is not called in that case.
pub fn assert_never<P>(
    predicate: P,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<PollOutcome>
where
    P: FnMut() -> bool,
{
    let interval = PollInterval::new(poll_interval)?;
    Ok(RetryingAssertion::new(TimeoutBudget::new(timeout), interval).never(predicate))
}
