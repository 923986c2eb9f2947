//! Testing utilities for Switchyard.
//!
//! This module provides factories and helpers that make router behavior easy
//! to observe in tests.
//!
//! # Features
//!
//! - [`CountingAction`]: an action factory that counts its invocations
//! - [`StaticValue`]: a value factory that always produces a clone of one value
//! - [`DeferredAction`]: an asynchronous action factory that parks callbacks
//!   until the test releases them
//! - [`capture_action`] / [`capture_value`]: turn a dispatch callback into an
//!   awaitable [`Captured`] future

use futures::{
    FutureExt,
    channel::oneshot::{self, Receiver},
};
use std::{
    any::Any,
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    task::{Context, Poll},
};
use switchyard_core::{
    AsyncDoHandler, DoCallback, DoHandler, DoResult, GetHandler, GetResult, Key, Param, Value,
};

// ============================================================================
// Counting Action
// ============================================================================

/// An action factory that counts invocations and returns a fixed outcome.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingAction::new();
/// router.register_action_handler("user/login", counter.clone())?;
///
/// router.perform("user/login", None)?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone)]
pub struct CountingAction {
    count: Arc<AtomicUsize>,
    outcome: DoResult,
}

impl CountingAction {
    /// Create a counter whose invocations succeed.
    pub fn new() -> Self {
        Self::with_outcome(Ok(()))
    }

    /// Create a counter that returns `outcome` from every invocation.
    pub fn with_outcome(outcome: DoResult) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            outcome,
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingAction {
    fn default() -> Self {
        Self::new()
    }
}

impl DoHandler for CountingAction {
    fn call(&self, _key: &Key, _param: Option<Param>) -> DoResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

// ============================================================================
// Static Value
// ============================================================================

/// A value factory that produces a clone of the same value on every call.
#[derive(Debug, Clone)]
pub struct StaticValue<T>(pub T);

impl<T> GetHandler for StaticValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn call(&self, _key: &Key, _param: Option<Param>) -> GetResult<Value> {
        Ok(Value::new(self.0.clone()))
    }
}

// ============================================================================
// Deferred Action
// ============================================================================

/// An asynchronous action factory that holds callbacks until released.
///
/// Lets a test observe that a dispatch returns before its callback runs, and
/// then complete the work on its own schedule.
#[derive(Clone, Default)]
pub struct DeferredAction {
    pending: Arc<Mutex<Vec<DoCallback>>>,
}

impl DeferredAction {
    /// Create a factory with no pending callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting to be completed.
    pub fn pending(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Complete every pending callback with `outcome`, returning how many ran.
    pub fn complete_all(&self, outcome: DoResult) -> usize {
        let drained: Vec<DoCallback> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return 0,
        };
        let count = drained.len();
        for callback in drained {
            callback(outcome.clone());
        }
        count
    }
}

impl AsyncDoHandler for DeferredAction {
    fn call(&self, _key: &Key, _param: Option<Param>, callback: DoCallback) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(callback);
        }
    }
}

// ============================================================================
// Callback Capture
// ============================================================================

/// The receiving end of a captured callback.
///
/// Resolves to `Some(result)` once the callback runs, or `None` if the callback
/// was dropped without being called.
pub struct Captured<T> {
    receiver: Receiver<T>,
}

impl<T> Captured<T> {
    /// Take the result if the callback has already run.
    pub fn try_take(&mut self) -> Option<T> {
        self.receiver.try_recv().ok().flatten()
    }
}

impl<T> Future for Captured<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver.poll_unpin(cx).map(Result::ok)
    }
}

/// Create a callback for `perform_with` and the future that observes it.
pub fn capture_action() -> (impl FnOnce(DoResult) + Send + 'static, Captured<DoResult>) {
    capture()
}

/// Create a callback for `get_with::<V>` and the future that observes it.
pub fn capture_value<V: Any + Send>() -> (
    impl FnOnce(GetResult<V>) + Send + 'static,
    Captured<GetResult<V>>,
) {
    capture()
}

fn capture<T: Send + 'static>() -> (impl FnOnce(T) + Send + 'static, Captured<T>) {
    let (sender, receiver) = oneshot::channel();
    let callback = move |result: T| {
        let _ = sender.send(result);
    };
    (callback, Captured { receiver })
}
