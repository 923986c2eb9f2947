//! Structured log points, compiled to nothing without the `tracing` feature.

use crate::registry::Flavor;
use switchyard_core::RouterError;

pub(crate) fn dispatch_failed(flavor: Flavor, err: &RouterError) {
    #[cfg(feature = "tracing")]
    {
        match err {
            RouterError::RegistryUnavailable { key } => {
                tracing::warn!(%flavor, %key, "registry unavailable");
            }
            _ => {
                tracing::debug!(%flavor, key = ?err.key(), error = %err, "dispatch failed");
            }
        }
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (flavor, err);
    }
}

pub(crate) fn registered(flavor: Flavor, key: &str, overwrote: bool) {
    #[cfg(feature = "tracing")]
    {
        tracing::debug!(%flavor, key, overwrote, "factory registered");
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (flavor, key, overwrote);
    }
}

pub(crate) fn registration_refused(flavor: Flavor, err: &RouterError) {
    #[cfg(feature = "tracing")]
    {
        tracing::warn!(%flavor, key = ?err.key(), error = %err, "registration refused");
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (flavor, err);
    }
}

pub(crate) fn component_failed(component: &str, err: &RouterError) {
    #[cfg(feature = "tracing")]
    {
        tracing::warn!(component, error = %err, "component registration failed");
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (component, err);
    }
}

pub(crate) fn component_panicked(component: &str) {
    #[cfg(feature = "tracing")]
    {
        tracing::warn!(component, "component panicked during registration");
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = component;
    }
}

pub(crate) fn bootstrapped(registered: usize, failed: usize) {
    #[cfg(feature = "tracing")]
    {
        tracing::info!(registered, failed, "router bootstrap complete");
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (registered, failed);
    }
}
