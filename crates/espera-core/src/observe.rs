//! Observable state providers.
//!
//! The poll loop never knows what it is looking at. It asks an
//! [`Observable`] for a fresh snapshot on every poll and hands that snapshot
//! to a predicate.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

/// Something that can produce a snapshot of its current state.
pub trait Observable {
    /// Snapshot type handed to predicates.
    type Snapshot;

    /// Captures the current state.
    fn snapshot(&self) -> Self::Snapshot;
}

impl<F, S> Observable for F
where
    F: Fn() -> S,
{
    type Snapshot = S;

    fn snapshot(&self) -> S {
        self()
    }
}

/// Async counterpart of [`Observable`], for state that must be fetched.
#[async_trait]
pub trait AsyncObservable: Send + Sync {
    /// Snapshot type handed to predicates.
    type Snapshot: Send;

    /// Captures the current state.
    async fn snapshot(&self) -> Self::Snapshot;
}

/// State shared between the code under test and the assertion observing it.
///
/// Writers may update it from any thread between polls; every snapshot is a
/// clone taken under a read lock.
#[derive(Debug, Default)]
pub struct SharedState<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for SharedState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedState<S> {
    /// Wraps an initial state.
    #[must_use]
    pub fn new(state: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Replaces the state.
    pub fn set(&self, state: S) {
        *self.inner.write() = state;
    }

    /// Mutates the state in place.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.inner.write());
    }

    /// Reads the state without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.read())
    }
}

impl<S: Clone> Observable for SharedState<S> {
    type Snapshot = S;

    fn snapshot(&self) -> S {
        self.inner.read().clone()
    }
}

#[async_trait]
impl<S: Clone + Send + Sync> AsyncObservable for SharedState<S> {
    type Snapshot = S;

    async fn snapshot(&self) -> S {
        self.inner.read().clone()
    }
}
