//! Type-erased payloads.
//!
//! [`Param`] carries caller data into a factory, [`Value`] carries a factory's
//! product back out. The router never looks inside either; only the two ends
//! of a route agree on the concrete types.

use crate::{error::RouterError, key::Key, result::GetResult};
use std::{any::Any, fmt};

/// An opaque parameter handed from the caller to a factory.
pub struct Param(Box<dyn Any + Send>);

impl Param {
    /// Wrap any sendable value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Check whether the parameter holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Borrow the parameter as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Take the parameter as a `T`, giving it back unchanged on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        self.0.downcast::<T>().map(|b| *b).map_err(Self)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param").finish_non_exhaustive()
    }
}

/// A type-erased value produced by a value factory.
///
/// The caller recovers the concrete type with [`Value::downcast`]; the router
/// uses [`Value::convert`], which turns a mismatch into
/// [`RouterError::TypeMismatch`] instead of panicking.
pub struct Value(Box<dyn Any + Send>);

impl Value {
    /// Erase a value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Check whether the value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Borrow the value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Take the value as a `T`, giving it back unchanged on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        self.0.downcast::<T>().map(|b| *b).map_err(Self)
    }

    /// Take the value as a `T`, failing closed with `TypeMismatch(key)`.
    pub fn convert<T: Any>(self, key: &Key) -> GetResult<T> {
        self.downcast::<T>()
            .map_err(|_| RouterError::type_mismatch::<T>(key.clone()))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_downcast() {
        let param = Param::new(String::from("creds"));
        assert!(param.is::<String>());
        assert_eq!(param.downcast_ref::<String>().map(String::as_str), Some("creds"));

        let param = param.downcast::<u8>().unwrap_err();
        assert_eq!(param.downcast::<String>().unwrap(), "creds");
    }

    #[test]
    fn test_value_convert() {
        let key = Key::from("user/profile");
        assert_eq!(Value::new(42_i64).convert::<i64>(&key), Ok(42));

        let err = Value::new(42_i64).convert::<String>(&key).unwrap_err();
        assert!(matches!(err, RouterError::TypeMismatch { key: k, .. } if k == "user/profile"));
    }
}
