//! # Keys and Route Tables
//!
//! A [`Key`] is the opaque string that names one routable capability, e.g.
//! `"user/login"`. A [`Table`] is anything that can resolve itself to a key:
//! raw strings, keys, and the enum-like route sets that modules declare for
//! their capabilities.
//!
//! Resolution is allowed to fail: an absent route (`None`) resolves to no key,
//! which the router reports as [`RouterError::KeyMissing`].
//!
//! [`RouterError::KeyMissing`]: crate::RouterError::KeyMissing

use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};

/// An immutable, cheaply clonable route key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Arc<str>);

impl Key {
    /// Create a key from any string-like value.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// View the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Key {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// A route set that resolves its entries to [`Key`]s.
///
/// Implementations must be deterministic and free of side effects: the same
/// value always resolves to the same key. Enum tables are usually derived with
/// `#[derive(Table)]` from the `switchyard` crate.
///
/// # Example
///
/// ```rust
/// use switchyard_core::{Key, Table};
///
/// enum UserTable {
///     Login,
///     Profile,
/// }
///
/// impl Table for UserTable {
///     fn url(&self) -> Option<Key> {
///         Some(Key::from(match self {
///             UserTable::Login => "user/login",
///             UserTable::Profile => "user/profile",
///         }))
///     }
/// }
///
/// assert_eq!(UserTable::Login.url().unwrap(), "user/login");
/// assert!(None::<UserTable>.url().is_none());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be resolved to a route key",
    label = "missing `Table` implementation",
    note = "Implement `Table` (or derive it) so the router can turn `{Self}` into a `Key`."
)]
pub trait Table {
    /// Resolve this route to its key, or `None` when there is nothing to route.
    fn url(&self) -> Option<Key>;
}

impl Table for str {
    fn url(&self) -> Option<Key> {
        Some(Key::from(self))
    }
}

impl Table for String {
    fn url(&self) -> Option<Key> {
        Some(Key::from(self.as_str()))
    }
}

impl Table for Key {
    fn url(&self) -> Option<Key> {
        Some(self.clone())
    }
}

impl<T: Table + ?Sized> Table for &T {
    fn url(&self) -> Option<Key> {
        (**self).url()
    }
}

impl<T: Table> Table for Option<T> {
    fn url(&self) -> Option<Key> {
        self.as_ref().and_then(Table::url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Broken;

    impl Table for Broken {
        fn url(&self) -> Option<Key> {
            None
        }
    }

    #[test]
    fn test_raw_strings_resolve() {
        assert_eq!("user/login".url(), Some(Key::from("user/login")));
        assert_eq!(String::from("a/b").url(), Some(Key::from("a/b")));
    }

    #[test]
    fn test_absent_routes_resolve_to_nothing() {
        assert_eq!(None::<&str>.url(), None);
        assert_eq!(Some(Broken).url(), None);
        assert_eq!(Some("x").url(), Some(Key::from("x")));
    }

    #[test]
    fn test_key_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Key::from("user/profile"), 42);
        assert_eq!(map.get("user/profile"), Some(&42));
        assert_eq!(Key::from("k").to_string(), "k");
        assert_eq!(format!("{:?}", Key::from("k")), "\"k\"");
    }
}
