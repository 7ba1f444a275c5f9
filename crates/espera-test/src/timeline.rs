//! Scripted state that changes over time.
//!
//! A [`Timeline`] replays fixed states at fixed offsets on a [`Clock`]. It
//! stands in for a page being rewritten by script the test does not
//! control: the assertion polling it sees whichever state is current at
//! the moment of each poll. Share a [`ManualClock`](espera_core::ManualClock)
//! between the timeline and the assertion to make every run identical.

use std::time::Duration;

use espera_core::{Clock, Observable};

use crate::error::{Result, TestError};

/// States keyed by the offset at which they take effect.
#[derive(Debug, Clone)]
pub struct Timeline<S, C: Clock> {
    clock: C,
    origin: Duration,
    /// Sorted by offset; ties keep insertion order.
    steps: Vec<(Duration, S)>,
}

impl<S, C: Clock> Timeline<S, C> {
    /// Starts a timeline at the clock's current time with an initial state.
    pub fn new(clock: C, initial: S) -> Self {
        let origin = clock.now();
        Self {
            clock,
            origin,
            steps: vec![(Duration::ZERO, initial)],
        }
    }

    /// Adds a state that takes effect `offset` after the timeline's origin.
    #[must_use]
    pub fn at(mut self, offset: Duration, state: S) -> Self {
        self.insert(offset, state);
        self
    }

    /// Schedules a state `delay` from now, as an event would.
    ///
    /// Returns the absolute offset the state was scheduled at.
    pub fn schedule(&mut self, delay: Duration, state: S) -> Duration {
        let offset = self.elapsed().saturating_add(delay);
        self.insert(offset, state);
        offset
    }

    /// Drops every state scheduled after the current moment.
    ///
    /// Used when a new event supersedes pending updates.
    pub fn cancel_pending(&mut self) {
        let now = self.elapsed();
        self.steps.retain(|(offset, _)| *offset <= now);
    }

    /// Time since the timeline's origin.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.origin)
    }

    /// State in effect at `offset` from the origin.
    #[must_use]
    pub fn state_at(&self, offset: Duration) -> &S {
        let index = self.steps.partition_point(|(at, _)| *at <= offset);
        // steps[0] is at offset zero, so index >= 1
        &self.steps[index.saturating_sub(1)].1
    }

    /// State in effect now.
    #[must_use]
    pub fn current(&self) -> &S {
        self.state_at(self.elapsed())
    }

    /// Offset of the last scheduled change.
    #[must_use]
    pub fn settles_at(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |(at, _)| *at)
    }

    /// Returns the clock driving the timeline.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Checks that no two changes share an offset.
    ///
    /// # Errors
    /// Returns [`TestError::Fixture`] naming the first ambiguous offset.
    pub fn validate(&self) -> Result<()> {
        for pair in self.steps.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(TestError::Fixture(format!(
                    "two states scheduled at {}",
                    humantime::format_duration(pair[0].0)
                )));
            }
        }
        Ok(())
    }

    fn insert(&mut self, offset: Duration, state: S) {
        let index = self.steps.partition_point(|(at, _)| *at <= offset);
        self.steps.insert(index, (offset, state));
    }
}

impl<S: Clone, C: Clock> Observable for Timeline<S, C> {
    type Snapshot = S;

    fn snapshot(&self) -> S {
        self.current().clone()
    }
}
