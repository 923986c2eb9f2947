//! Error taxonomy shared by every dispatch flavor.
//!
//! Dispatch checks run in a fixed order and stop at the first failure:
//!
//! 1. [`RouterError::KeyMissing`] - the route did not resolve to a key
//! 2. [`RouterError::RegistryUnavailable`] - the flavor's registry could not be obtained
//! 3. [`RouterError::HandlerNotFound`] - nothing is registered under the key
//! 4. [`RouterError::TypeMismatch`] - value flavors only, the produced value has the wrong type

use crate::key::Key;
use thiserror::Error;

/// The failure branch of every dispatch result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The caller supplied no resolvable key.
    #[error("route did not resolve to a key")]
    KeyMissing,

    /// The registry for the requested flavor could not be obtained.
    #[error("no registry available for key: {key}")]
    RegistryUnavailable {
        /// The key being dispatched.
        key: Key,
    },

    /// The key resolved but no factory is registered under it.
    #[error("no handler registered for key: {key}")]
    HandlerNotFound {
        /// The key being dispatched.
        key: Key,
    },

    /// The factory produced a value that is not of the requested type.
    #[error("value for key {key} is not a `{expected}`")]
    TypeMismatch {
        /// The key being dispatched.
        key: Key,
        /// Name of the type the caller asked for.
        expected: &'static str,
    },
}

impl RouterError {
    /// The key the failed dispatch was made against, if one was resolved.
    pub fn key(&self) -> Option<&Key> {
        match self {
            RouterError::KeyMissing => None,
            RouterError::RegistryUnavailable { key }
            | RouterError::HandlerNotFound { key }
            | RouterError::TypeMismatch { key, .. } => Some(key),
        }
    }

    pub(crate) fn type_mismatch<T>(key: Key) -> Self {
        RouterError::TypeMismatch {
            key,
            expected: std::any::type_name::<T>(),
        }
    }
}
