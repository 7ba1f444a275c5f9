//! Espera: Retrying Assertions for Asynchronously Updating State
//!
//! Tests against state that another thread, task, or script is still
//! changing need to wait for the state, not for a fixed amount of time.
//! Espera polls a predicate until it holds (or until it is proven never to
//! hold) within a timeout budget.
//!
//! # Quick Start
//!
//! ```rust
//! use espera::prelude::*;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let page = Timeline::new(clock.clone(), Page::default()).at(
//!     Duration::from_millis(200),
//!     Page::new([Element::new("td").with_text("Sharoar Dewshining")]),
//! );
//!
//! let outcome = expect(&page)
//!     .on_clock(clock)
//!     .to(has_content("Sharoar Dewshining"))
//!     .unwrap();
//! assert_eq!(outcome.elapsed, Duration::from_millis(200));
//! ```

pub use espera_core as core;
pub use espera_test as testing;

/// Prelude module for common imports.
pub mod prelude {
    pub use espera_core::{
        Clock, ManualClock, Observable, PollOutcome, SharedState, SystemClock, WaitConfig,
        WaitError, assert_eventually, assert_never,
    };
    pub use espera_test::{
        Element, Expectation, Matcher, Page, TestError, Timeline, expect, has_content, has_css,
        matcher, not, within,
    };
}
