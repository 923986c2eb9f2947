//! # Factories
//!
//! A factory is the behavior registered under a key. There are four shapes,
//! one per dispatch flavor:
//!
//! | Trait | Signature |
//! |-------|-----------|
//! | [`DoHandler`] | `(key, param) -> DoResult` |
//! | [`GetHandler`] | `(key, param) -> GetResult<Value>` |
//! | [`AsyncDoHandler`] | `(key, param, DoCallback)` |
//! | [`AsyncGetHandler`] | `(key, param, GetCallback)` |
//!
//! Every trait has a blanket implementation for closures of the matching
//! shape, so most registrations are plain closures. Factory bodies are opaque
//! to the router: they may block, spawn threads, or dispatch further routes.
//!
//! # Callbacks
//!
//! Asynchronous factories receive a boxed `FnOnce` callback. The type system
//! ensures it runs at most once; running it exactly once is the factory's
//! side of the contract. The router never schedules it anywhere, so the
//! factory decides which thread or executor delivers the result.

use crate::{
    key::Key,
    payload::{Param, Value},
    result::{DoResult, GetResult},
};

/// Receives the outcome of an asynchronous action.
pub type DoCallback = Box<dyn FnOnce(DoResult) + Send + 'static>;

/// Receives the type-erased outcome of an asynchronous value factory.
pub type GetCallback = Box<dyn FnOnce(GetResult<Value>) + Send + 'static>;

/// A synchronous action factory.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an action factory",
    label = "expected `Fn(&Key, Option<Param>) -> DoResult`",
    note = "Action factories take the key and an optional parameter and return a `DoResult`."
)]
pub trait DoHandler: Send + Sync + 'static {
    /// Perform the action.
    fn call(&self, key: &Key, param: Option<Param>) -> DoResult;
}

impl<F> DoHandler for F
where
    F: Fn(&Key, Option<Param>) -> DoResult + Send + Sync + 'static,
{
    fn call(&self, key: &Key, param: Option<Param>) -> DoResult {
        (self)(key, param)
    }
}

/// A synchronous value factory.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a value factory",
    label = "expected `Fn(&Key, Option<Param>) -> GetResult<Value>`",
    note = "Value factories erase their product with `Value::new`."
)]
pub trait GetHandler: Send + Sync + 'static {
    /// Produce the value.
    fn call(&self, key: &Key, param: Option<Param>) -> GetResult<Value>;
}

impl<F> GetHandler for F
where
    F: Fn(&Key, Option<Param>) -> GetResult<Value> + Send + Sync + 'static,
{
    fn call(&self, key: &Key, param: Option<Param>) -> GetResult<Value> {
        (self)(key, param)
    }
}

/// An asynchronous action factory.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an asynchronous action factory",
    label = "expected `Fn(&Key, Option<Param>, DoCallback)`",
    note = "Asynchronous factories must eventually invoke the callback exactly once."
)]
pub trait AsyncDoHandler: Send + Sync + 'static {
    /// Start the action; `callback` receives the outcome.
    fn call(&self, key: &Key, param: Option<Param>, callback: DoCallback);
}

impl<F> AsyncDoHandler for F
where
    F: Fn(&Key, Option<Param>, DoCallback) + Send + Sync + 'static,
{
    fn call(&self, key: &Key, param: Option<Param>, callback: DoCallback) {
        (self)(key, param, callback)
    }
}

/// An asynchronous value factory.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an asynchronous value factory",
    label = "expected `Fn(&Key, Option<Param>, GetCallback)`",
    note = "Asynchronous factories must eventually invoke the callback exactly once."
)]
pub trait AsyncGetHandler: Send + Sync + 'static {
    /// Start producing the value; `callback` receives the outcome.
    fn call(&self, key: &Key, param: Option<Param>, callback: GetCallback);
}

impl<F> AsyncGetHandler for F
where
    F: Fn(&Key, Option<Param>, GetCallback) + Send + Sync + 'static,
{
    fn call(&self, key: &Key, param: Option<Param>, callback: GetCallback) {
        (self)(key, param, callback)
    }
}
