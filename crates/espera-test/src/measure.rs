//! Timing of assertion blocks.
//!
//! Slow suites are usually slow because of how their waits are phrased, not
//! because of what they check. [`measure`] makes that cost visible per
//! block: it times a closure and logs the result.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use espera_core::{Clock, SystemClock};

/// How long one labelled block took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measurement {
    /// What was measured.
    pub label: String,
    /// Time spent in the block.
    pub elapsed: Duration,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {}",
            self.label,
            humantime::format_duration(self.elapsed)
        )
    }
}

/// Times `block` on wall-clock time.
pub fn measure<T>(label: impl Into<String>, block: impl FnOnce() -> T) -> (T, Measurement) {
    measure_on(&SystemClock::new(), label, block)
}

/// Times `block` on `clock`.
///
/// With a [`ManualClock`](espera_core::ManualClock) the measurement is the
/// virtual time the block's assertions slept, which makes timing
/// comparisons exact and repeatable.
pub fn measure_on<C: Clock + ?Sized, T>(
    clock: &C,
    label: impl Into<String>,
    block: impl FnOnce() -> T,
) -> (T, Measurement) {
    let start = clock.now();
    let value = block();
    let measurement = Measurement {
        label: label.into(),
        elapsed: clock.now().saturating_sub(start),
    };
    tracing::info!(label = %measurement.label, elapsed = ?measurement.elapsed, "{measurement}");
    (value, measurement)
}
