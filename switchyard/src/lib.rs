//! # switchyard - String-Keyed Capability Router
//!
//! `switchyard` lets modules publish capabilities under string keys and lets
//! callers invoke them by name without depending on each other. A caller asks
//! the [`Router`] to perform an action or fetch a value; the router finds the
//! factory registered under that key, runs it, and hands back a result that
//! says exactly what happened.
//!
//! ## Quick Start
//!
//! ```rust
//! use switchyard::{GetResultExt, Param, Router, RouterError, Value};
//!
//! let router = Router::new();
//! router.register_action("user/login", |_key, _param| Ok(())).unwrap();
//! router
//!     .register_value("user/profile", |_key, _param| Ok(Value::new(42_i64)))
//!     .unwrap();
//!
//! assert_eq!(router.perform("user/login", Some(Param::new("creds"))), Ok(()));
//! assert!(matches!(
//!     router.perform("user/logout", None),
//!     Err(RouterError::HandlerNotFound { .. })
//! ));
//!
//! assert_eq!(router.get::<i64>("user/profile", None), Ok(42));
//! assert_eq!(router.get::<String>("user/profile", None).get_or(String::new()), "");
//! ```
//!
//! ## Flavors
//!
//! | Flavor | Register | Dispatch |
//! |--------|----------|----------|
//! | Action | [`Router::register_action`] | [`Router::perform`] |
//! | Value | [`Router::register_value`] | [`Router::get`] |
//! | Async action | [`Router::register_async_action`] | [`Router::perform_with`] |
//! | Async value | [`Router::register_async_value`] | [`Router::get_with`] |
//!
//! Each flavor has its own registry, so the same key may name an action and a
//! value independently.
//!
//! ## Feature Flags
//!
//! - `macros` (default): `#[derive(Table)]` for enum route tables
//! - `tracing` (default): structured logs for dispatch misses, registration
//!   and bootstrap
//! - `inventory`: link-time component discovery via [`submit_component!`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use switchyard_core::{
    AsyncDoHandler,
    AsyncGetHandler,
    // Callbacks
    DoCallback,
    // Factories
    DoHandler,
    // Results
    DoResult,
    GetCallback,
    GetHandler,
    GetResult,
    GetResultExt,
    // Keys
    Key,
    // Payloads
    Param,
    // Errors
    RouterError,
    Table,
    Value,
};

pub use switchyard_std::{
    // Components
    Component,
    ComponentList,
    ComponentSource,
    // Registries
    FactoryMap,
    FactoryProvider,
    Flavor,
    Flavors,
    Registration,
    Registries,
    RegistryError,
    // Router
    Router,
    RouterBuilder,
};

#[cfg(feature = "inventory")]
pub use switchyard_std::{InventorySource, submit_component};

/// Testing utilities.
pub mod testing {
    pub use switchyard_std::testing::{
        Captured, CountingAction, DeferredAction, StaticValue, capture_action, capture_value,
    };
}

/// Prelude module - common imports for Switchyard.
///
/// # Usage
///
/// ```rust,ignore
/// use switchyard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Component, DoResult, GetResult, GetResultExt, Key, Param, Router, RouterError, Table,
        Value,
    };
}

#[cfg(feature = "macros")]
pub use switchyard_macros::Table;

#[cfg(feature = "inventory")]
pub use inventory;
