//! # switchyard-std
//!
//! Standard implementations for the Switchyard capability router.
//!
//! This crate provides:
//! - **Registries**: [`FactoryMap`], [`Registries`] and the [`FactoryProvider`] seam
//! - **Router**: [`Router`], the dispatch and registration service
//! - **Components**: [`Component`], [`ComponentSource`], [`ComponentList`] and,
//!   with the `inventory` feature, link-time discovery
//! - **Testing**: helpers for observing dispatches in tests

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core vocabulary
pub use switchyard_core;

// Modules
pub mod component;
mod log;
pub mod registry;
pub mod router;
pub mod testing;

pub use component::{Component, ComponentList, ComponentSource, Registration};
#[cfg(feature = "inventory")]
pub use component::InventorySource;
pub use registry::{FactoryMap, FactoryProvider, Flavor, Flavors, Registries, RegistryError};
pub use router::{Router, RouterBuilder};

#[cfg(feature = "inventory")]
pub use inventory;
