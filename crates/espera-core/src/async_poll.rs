//! Async poll loop on the tokio timer.
//!
//! Same contract as [`RetryingAssertion`](crate::RetryingAssertion): the
//! predicate is awaited immediately, then once per interval, and the final
//! sleep is clamped to the remaining budget. The task suspends between
//! polls instead of blocking its thread.

use std::future::Future;

use tokio::time::Instant;

use crate::config::WaitConfig;
use crate::error::Result;
use crate::observe::AsyncObservable;
use crate::types::{PollMode, PollOutcome};

/// Awaits `predicate` until it resolves true or the configured budget is spent.
///
/// # Errors
/// Returns an error if `config` is invalid; the predicate is not polled then.
pub async fn eventually_async<P, F>(config: &WaitConfig, predicate: P) -> Result<PollOutcome>
where
    P: FnMut() -> F,
    F: Future<Output = bool>,
{
    run(config, PollMode::Eventually, predicate).await
}

/// Requires `predicate` to resolve false on every poll for the whole budget.
///
/// # Errors
/// Returns an error if `config` is invalid; the predicate is not polled then.
pub async fn never_async<P, F>(config: &WaitConfig, predicate: P) -> Result<PollOutcome>
where
    P: FnMut() -> F,
    F: Future<Output = bool>,
{
    run(config, PollMode::Never, predicate).await
}

/// Polls an [`AsyncObservable`] until `check` holds for one of its snapshots.
///
/// # Errors
/// Returns an error if `config` is invalid.
pub async fn observe_eventually<O, C>(
    config: &WaitConfig,
    source: &O,
    mut check: C,
) -> Result<PollOutcome>
where
    O: AsyncObservable + ?Sized,
    C: FnMut(&O::Snapshot) -> bool,
{
    poll_loop(
        config,
        PollMode::Eventually,
        move || source.snapshot(),
        |snapshot| check(&snapshot),
    )
    .await
}

async fn run<P, F>(config: &WaitConfig, mode: PollMode, predicate: P) -> Result<PollOutcome>
where
    P: FnMut() -> F,
    F: Future<Output = bool>,
{
    poll_loop(config, mode, predicate, |hit| hit).await
}

/// Awaits `fetch` once per poll and decides on its output with `check`.
async fn poll_loop<P, F, C>(
    config: &WaitConfig,
    mode: PollMode,
    mut fetch: P,
    mut check: C,
) -> Result<PollOutcome>
where
    P: FnMut() -> F,
    F: Future,
    C: FnMut(F::Output) -> bool,
{
    let budget = config.budget().as_duration();
    let interval = config.interval()?.as_duration();
    let start = Instant::now();
    let mut polls: u32 = 0;

    loop {
        polls = polls.saturating_add(1);
        let hit = check(fetch().await);
        let elapsed = start.elapsed();

        if hit {
            tracing::debug!(%mode, polls, elapsed = ?elapsed, "predicate observed true");
            return Ok(match mode {
                PollMode::Eventually => PollOutcome::success(mode, elapsed, polls),
                PollMode::Never => PollOutcome::failure(mode, elapsed, polls),
            });
        }

        if elapsed >= budget {
            return Ok(match mode {
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
            });
        }

        tokio::time::sleep(interval.min(budget - elapsed)).await;
    }
}
