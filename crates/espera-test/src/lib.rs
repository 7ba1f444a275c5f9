// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # espera-test
//!
//! Testing surface built on the espera retrying assertions.
//!
//! This crate provides:
//! - **Matchers**: named, invertible predicates over snapshots
//! - **Expectations**: `expect(&source).to(..)`, `to_not`, `never`, `now`
//! - **Page snapshots**: content and CSS-selector matchers over a frozen page
//! - **Timelines**: scripted state changes for deterministic race scenarios
//! - **Measurement**: timing of assertion blocks
//! - **Falsification tests**: race and timing claims stated as refutable tests
//!
//! ## Iron Lotus Framework
//!
//! - **Built-in Quality** (品質の作り込み): Quality cannot be inspected in
//! - **Popperian Falsification**: Tests designed to refute claims
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use espera_core::{ManualClock, WaitConfig};
//! use espera_test::{Element, Page, Timeline, expect, has_content};
//!
//! let clock = ManualClock::new();
//! let loaded = Page::new([Element::new("td").with_text("Sharoar Dewshining")]);
//! let page = Timeline::new(clock.clone(), Page::default())
//!     .at(Duration::from_millis(200), loaded);
//!
//! let outcome = expect(&page)
//!     .with_config(WaitConfig::default())
//!     .on_clock(clock)
//!     .to(has_content("Sharoar Dewshining"))
//!     .unwrap();
//! assert_eq!(outcome.elapsed, Duration::from_millis(200));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod expect;
pub mod matcher;
pub mod measure;
pub mod page;
pub mod timeline;

pub use error::{Result, TestError};
pub use expect::{Expectation, expect};
pub use matcher::{And, FnMatcher, Matcher, Not, both, matcher, not};
pub use measure::{Measurement, measure, measure_on};
pub use page::{
    Element, HasContent, HasCss, Page, Selector, Within, has_content, has_css, has_css_with_text,
    within,
};
pub use timeline::Timeline;
