//! Named predicates over snapshots.
//!
//! A matcher is the unit an [`Expectation`](crate::Expectation) polls: it
//! answers yes/no for one snapshot and describes itself for failure
//! messages. Custom matchers are either a type implementing [`Matcher`] or a
//! closure wrapped by [`matcher`].

use std::fmt;

/// Yes/no check over a snapshot of type `S`.
pub trait Matcher<S: ?Sized> {
    /// Returns true if `subject` satisfies the matcher.
    fn matches(&self, subject: &S) -> bool;

    /// Human-readable description used in failure messages.
    fn description(&self) -> String;
}

impl<S: ?Sized, M: Matcher<S> + ?Sized> Matcher<S> for &M {
    fn matches(&self, subject: &S) -> bool {
        (**self).matches(subject)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

impl<S: ?Sized, M: Matcher<S> + ?Sized> Matcher<S> for Box<M> {
    fn matches(&self, subject: &S) -> bool {
        (**self).matches(subject)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

/// Matcher backed by a closure.
pub struct FnMatcher<F> {
    description: String,
    check: F,
}

impl<F> fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMatcher")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<S: ?Sized, F: Fn(&S) -> bool> Matcher<S> for FnMatcher<F> {
    fn matches(&self, subject: &S) -> bool {
        (self.check)(subject)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Wraps a closure as a described matcher.
///
/// ```rust
/// use espera_test::{Matcher, matcher};
///
/// let even = matcher("an even number", |n: &u32| n % 2 == 0);
/// assert!(even.matches(&4));
/// assert_eq!(Matcher::<u32>::description(&even), "an even number");
/// ```
pub fn matcher<S: ?Sized, F>(description: impl Into<String>, check: F) -> FnMatcher<F>
where
    F: Fn(&S) -> bool,
{
    FnMatcher {
        description: description.into(),
        check,
    }
}

/// Inverts a matcher.
#[derive(Debug, Clone)]
pub struct Not<M>(pub M);

impl<S: ?Sized, M: Matcher<S>> Matcher<S> for Not<M> {
    fn matches(&self, subject: &S) -> bool {
        !self.0.matches(subject)
    }

    fn description(&self) -> String {
        format!("no {}", self.0.description())
    }
}

/// Inverts a matcher.
pub const fn not<M>(inner: M) -> Not<M> {
    Not(inner)
}

/// Matches when both matchers match the same snapshot.
#[derive(Debug, Clone)]
pub struct And<A, B>(pub A, pub B);

impl<S: ?Sized, A: Matcher<S>, B: Matcher<S>> Matcher<S> for And<A, B> {
    fn matches(&self, subject: &S) -> bool {
        self.0.matches(subject) && self.1.matches(subject)
    }

    fn description(&self) -> String {
        format!("{} and {}", self.0.description(), self.1.description())
    }
}

/// Matches when both matchers match the same snapshot.
pub const fn both<A, B>(a: A, b: B) -> And<A, B> {
    And(a, b)
}
