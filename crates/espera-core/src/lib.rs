// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # espera-core
//!
//! Retrying assertion primitives: poll a predicate over externally changing
//! state until it holds, or until a timeout budget runs out.
//!
//! - [`RetryingAssertion`] with [`eventually`](RetryingAssertion::eventually)
//!   and [`never`](RetryingAssertion::never) poll loops
//! - [`assert_eventually`] / [`assert_never`] wall-clock shorthands
//! - [`WaitConfig`] for explicit, validated timeout and poll interval
//! - [`Clock`] with [`SystemClock`] and the virtual [`ManualClock`]
//! - [`Observable`] / [`AsyncObservable`] snapshot providers
//! - [`eventually_async`] / [`never_async`] on the tokio timer
//!
//! ## Iron Lotus Framework
//!
//! - **Genchi Genbutsu**: re-observe state on every poll
//! - **Jidoka**: explicit error handling, no panics
//! - **Poka-Yoke**: invalid budgets are rejected before the first poll
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use espera_core::{ManualClock, PollInterval, RetryingAssertion, TimeoutBudget, Clock};
//!
//! let clock = ManualClock::new();
//! let page = clock.clone();
//! let outcome = RetryingAssertion::with_clock(
//!     TimeoutBudget::from_millis(2000),
//!     PollInterval::from_millis(100).unwrap(),
//!     clock,
//! )
//! .eventually(|| page.now() >= Duration::from_millis(300));
//!
//! assert!(outcome.succeeded);
//! assert_eq!(outcome.elapsed, Duration::from_millis(300));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod assertion;
pub mod async_poll;
pub mod clock;
pub mod config;
pub mod error;
pub mod observe;
pub mod types;

pub use assertion::{RetryingAssertion, assert_eventually, assert_never};
pub use async_poll::{eventually_async, never_async, observe_eventually};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::WaitConfig;
pub use error::{Result, WaitError};
pub use observe::{AsyncObservable, Observable, SharedState};
pub use types::{PollInterval, PollMode, PollOutcome, TimeoutBudget};
