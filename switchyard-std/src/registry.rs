//! Factory registries.
//!
//! Each dispatch flavor owns one [`FactoryMap`]: a key → factory table behind a
//! reader/writer lock. Dispatch takes the read lock just long enough to clone
//! the factory's `Arc` out, so factories run without any lock held and are free
//! to register or dispatch further routes.
//!
//! A [`FactoryProvider`] hands out the four maps. [`Registries`] is the default
//! in-memory provider; custom providers may withhold a flavor, which the router
//! reports as `RegistryUnavailable`.

use bitflags::bitflags;
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};
use switchyard_core::{AsyncDoHandler, AsyncGetHandler, DoHandler, GetHandler, Key};
use thiserror::Error;

/// Errors raised by a [`FactoryMap`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// A writer panicked while holding the lock; the table can no longer be trusted.
    #[error("registry lock poisoned")]
    Poisoned,
}

/// The four dispatch flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Synchronous action.
    Action,
    /// Synchronous value.
    Value,
    /// Asynchronous action.
    AsyncAction,
    /// Asynchronous value.
    AsyncValue,
}

impl Flavor {
    /// All flavors, in registry order.
    pub const ALL: [Flavor; 4] = [
        Flavor::Action,
        Flavor::Value,
        Flavor::AsyncAction,
        Flavor::AsyncValue,
    ];

    /// The single-bit [`Flavors`] set for this flavor.
    pub const fn as_flags(self) -> Flavors {
        match self {
            Flavor::Action => Flavors::ACTION,
            Flavor::Value => Flavors::VALUE,
            Flavor::AsyncAction => Flavors::ASYNC_ACTION,
            Flavor::AsyncValue => Flavors::ASYNC_VALUE,
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flavor::Action => "action",
            Flavor::Value => "value",
            Flavor::AsyncAction => "async-action",
            Flavor::AsyncValue => "async-value",
        })
    }
}

bitflags! {
    /// A set of flavors, e.g. every registry that holds a given key.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flavors: u8 {
        /// Synchronous action registry.
        const ACTION = 1 << 0;
        /// Synchronous value registry.
        const VALUE = 1 << 1;
        /// Asynchronous action registry.
        const ASYNC_ACTION = 1 << 2;
        /// Asynchronous value registry.
        const ASYNC_VALUE = 1 << 3;
    }
}

/// A lock-guarded key → factory table.
pub struct FactoryMap<H: ?Sized> {
    entries: RwLock<HashMap<Key, Arc<H>>>,
}

impl<H: ?Sized> FactoryMap<H> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or overwrite the factory for `key`.
    ///
    /// Returns `true` when an existing factory was replaced. The replaced
    /// factory is dropped after the lock is released.
    pub fn insert(&self, key: Key, factory: Arc<H>) -> Result<bool, RegistryError> {
        let mut entries = self.entries.write().map_err(|_| RegistryError::Poisoned)?;
        let previous = entries.insert(key, factory);
        drop(entries);
        Ok(previous.is_some())
    }

    /// Poison the lock, as a writer panicking mid-update would.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.entries.write();
            panic!("writer dies holding the lock");
        }));
    }

    /// Fetch the factory registered under `key`.
    pub fn lookup(&self, key: &str) -> Result<Option<Arc<H>>, RegistryError> {
        let entries = self.entries.read().map_err(|_| RegistryError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    /// Check whether `key` has a factory.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.lookup(key), Ok(Some(_)))
    }

    /// Snapshot of all registered keys, in no particular order.
    pub fn keys(&self) -> Vec<Key> {
        self.entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: ?Sized> Default for FactoryMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for FactoryMap<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryMap")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Supplies the per-flavor registries to a router.
///
/// Returning `None` marks that flavor as unavailable: dispatch against it
/// fails with `RegistryUnavailable` and registration into it is refused.
pub trait FactoryProvider: Send + Sync + 'static {
    /// Registry of synchronous action factories.
    fn actions(&self) -> Option<&FactoryMap<dyn DoHandler>>;

    /// Registry of synchronous value factories.
    fn values(&self) -> Option<&FactoryMap<dyn GetHandler>>;

    /// Registry of asynchronous action factories.
    fn async_actions(&self) -> Option<&FactoryMap<dyn AsyncDoHandler>>;

    /// Registry of asynchronous value factories.
    fn async_values(&self) -> Option<&FactoryMap<dyn AsyncGetHandler>>;
}

/// The default provider: four in-memory registries, all available.
#[derive(Default, Debug)]
pub struct Registries {
    actions: FactoryMap<dyn DoHandler>,
    values: FactoryMap<dyn GetHandler>,
    async_actions: FactoryMap<dyn AsyncDoHandler>,
    async_values: FactoryMap<dyn AsyncGetHandler>,
}

impl Registries {
    /// Create four empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of factories registered for `flavor`.
    pub fn len(&self, flavor: Flavor) -> usize {
        match flavor {
            Flavor::Action => self.actions.len(),
            Flavor::Value => self.values.len(),
            Flavor::AsyncAction => self.async_actions.len(),
            Flavor::AsyncValue => self.async_values.len(),
        }
    }

    /// Check whether no factory of any flavor is registered.
    pub fn is_empty(&self) -> bool {
        Flavor::ALL.iter().all(|flavor| self.len(*flavor) == 0)
    }
}

impl FactoryProvider for Registries {
    fn actions(&self) -> Option<&FactoryMap<dyn DoHandler>> {
        Some(&self.actions)
    }

    fn values(&self) -> Option<&FactoryMap<dyn GetHandler>> {
        Some(&self.values)
    }

    fn async_actions(&self) -> Option<&FactoryMap<dyn AsyncDoHandler>> {
        Some(&self.async_actions)
    }

    fn async_values(&self) -> Option<&FactoryMap<dyn AsyncGetHandler>> {
        Some(&self.async_values)
    }
}

/// Ties a factory trait object to its flavor and its registry.
pub(crate) trait Flavored {
    const FLAVOR: Flavor;

    fn registry(provider: &dyn FactoryProvider) -> Option<&FactoryMap<Self>>;
}

impl Flavored for dyn DoHandler {
    const FLAVOR: Flavor = Flavor::Action;

    fn registry(provider: &dyn FactoryProvider) -> Option<&FactoryMap<Self>> {
        provider.actions()
    }
}

impl Flavored for dyn GetHandler {
    const FLAVOR: Flavor = Flavor::Value;

    fn registry(provider: &dyn FactoryProvider) -> Option<&FactoryMap<Self>> {
        provider.values()
    }
}

impl Flavored for dyn AsyncDoHandler {
    const FLAVOR: Flavor = Flavor::AsyncAction;

    fn registry(provider: &dyn FactoryProvider) -> Option<&FactoryMap<Self>> {
        provider.async_actions()
    }
}

impl Flavored for dyn AsyncGetHandler {
    const FLAVOR: Flavor = Flavor::AsyncValue;

    fn registry(provider: &dyn FactoryProvider) -> Option<&FactoryMap<Self>> {
        provider.async_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::{DoResult, Param};

    fn ok_action() -> Arc<dyn DoHandler> {
        Arc::new(|_: &Key, _: Option<Param>| -> DoResult { Ok(()) })
    }

    #[test]
    fn test_insert_reports_overwrite() {
        let map: FactoryMap<dyn DoHandler> = FactoryMap::new();
        assert_eq!(map.insert(Key::from("a"), ok_action()), Ok(false));
        assert_eq!(map.insert(Key::from("a"), ok_action()), Ok(true));
        assert_eq!(map.len(), 1);
        assert!(map.contains("a"));
        assert!(!map.contains("b"));
    }

    #[test]
    fn test_poisoned_map_is_unavailable() {
        let map: Arc<FactoryMap<dyn DoHandler>> = Arc::new(FactoryMap::new());
        map.insert(Key::from("a"), ok_action()).unwrap();

        let poisoner = map.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("writer dies holding the lock");
        })
        .join();

        assert_eq!(map.lookup("a").err(), Some(RegistryError::Poisoned));
        assert_eq!(
            map.insert(Key::from("b"), ok_action()),
            Err(RegistryError::Poisoned)
        );
        assert!(!map.contains("a"));
        assert!(map.keys().is_empty());
    }

    /// Captured state that touches the map when the factory owning it is dropped.
    struct OnDrop(Box<dyn Fn() + Send + Sync>);

    impl Drop for OnDrop {
        fn drop(&mut self) {
            (self.0)()
        }
    }

    fn action_holding(guard: OnDrop) -> Arc<dyn DoHandler> {
        Arc::new(move |_: &Key, _: Option<Param>| -> DoResult {
            let _ = &guard;
            Ok(())
        })
    }

    #[test]
    fn test_replaced_factory_may_reenter_map_on_drop() {
        let map: Arc<FactoryMap<dyn DoHandler>> = Arc::new(FactoryMap::new());
        let weak = Arc::downgrade(&map);
        let guard = OnDrop(Box::new(move || {
            if let Some(map) = weak.upgrade() {
                map.insert(Key::from("from-drop"), ok_action()).unwrap();
            }
        }));
        map.insert(Key::from("a"), action_holding(guard)).unwrap();

        assert_eq!(map.insert(Key::from("a"), ok_action()), Ok(true));
        assert!(map.contains("from-drop"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_panicking_drop_of_replaced_factory_leaves_map_usable() {
        let map: FactoryMap<dyn DoHandler> = FactoryMap::new();
        let guard = OnDrop(Box::new(|| panic!("captured state fails to drop")));
        map.insert(Key::from("a"), action_holding(guard)).unwrap();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            map.insert(Key::from("a"), ok_action())
        }));
        assert!(outcome.is_err());

        assert!(map.lookup("a").unwrap().is_some());
        assert_eq!(map.insert(Key::from("b"), ok_action()), Ok(false));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_poison_helper_matches_a_dead_writer() {
        let map: FactoryMap<dyn DoHandler> = FactoryMap::new();
        map.poison();
        assert_eq!(map.lookup("a").err(), Some(RegistryError::Poisoned));
    }

    #[test]
    fn test_registries_len_per_flavor() {
        let registries = Registries::new();
        assert!(registries.is_empty());

        registries
            .actions()
            .unwrap()
            .insert(Key::from("a"), ok_action())
            .unwrap();
        assert_eq!(registries.len(Flavor::Action), 1);
        assert_eq!(registries.len(Flavor::Value), 0);
        assert!(!registries.is_empty());
    }

    #[test]
    fn test_flavor_flags() {
        let all = Flavor::ALL
            .iter()
            .fold(Flavors::empty(), |acc, f| acc | f.as_flags());
        assert_eq!(all, Flavors::all());
        assert_eq!(Flavor::AsyncValue.to_string(), "async-value");
    }
}
