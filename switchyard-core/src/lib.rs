//! # switchyard-core
//!
//! Core vocabulary for the Switchyard capability router.
//!
//! This crate has minimal dependencies and is meant to be imported by modules
//! that declare routes or implement factories without pulling in the router
//! itself.
//!
//! # Pieces
//!
//! - **Keys** ([`Key`], [`Table`]): how a route names a capability
//! - **Payloads** ([`Param`], [`Value`]): type-erased data crossing the router
//! - **Results** ([`DoResult`], [`GetResult`]): what a dispatch produces
//! - **Errors** ([`RouterError`]): the four ways a dispatch can fail
//! - **Factories** ([`DoHandler`], [`GetHandler`], [`AsyncDoHandler`],
//!   [`AsyncGetHandler`]): the behavior registered under a key

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod key;
mod payload;
mod result;

// Re-exports
pub use error::RouterError;
pub use handler::{AsyncDoHandler, AsyncGetHandler, DoCallback, DoHandler, GetCallback, GetHandler};
pub use key::{Key, Table};
pub use payload::{Param, Value};
pub use result::{DoResult, GetResult, GetResultExt};
