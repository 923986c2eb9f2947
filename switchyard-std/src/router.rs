//! # The Router Service
//!
//! [`Router`] is the single entry point for both halves of the system:
//!
//! - **Dispatch**: [`perform`](Router::perform), [`perform_with`](Router::perform_with),
//!   [`get`](Router::get) and [`get_with`](Router::get_with)
//! - **Registration**: `register_*` for each of the four factory shapes, plus
//!   the one-time [`bootstrap`](Router::bootstrap) pass over component sources
//!
//! Every dispatch follows the same four steps and stops at the first failure:
//! resolve the key, fetch the flavor's registry, look the factory up, invoke it
//! and adapt the result. Failures are always returned (or delivered to the
//! callback) as a [`RouterError`]; nothing panics across the router boundary
//! except a panicking factory body.
//!
//! The router holds no per-call state and performs no threading. It is meant
//! to be created once by the host and shared by reference or `Arc` for the
//! life of the process.

use crate::{
    component::{Component, ComponentList, ComponentSource},
    log,
    registry::{FactoryMap, FactoryProvider, Flavored, Flavors, Registries},
};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Once},
};
use switchyard_core::{
    AsyncDoHandler, AsyncGetHandler, DoCallback, DoHandler, DoResult, GetCallback, GetHandler,
    GetResult, Key, Param, RouterError, Table, Value,
};

/// A string-keyed capability router.
pub struct Router {
    provider: Box<dyn FactoryProvider>,
    sources: Vec<Box<dyn ComponentSource>>,
    bootstrapped: Once,
}

impl Router {
    /// Create a router over empty in-memory [`Registries`] with no component sources.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Run the action registered under `table`.
    pub fn perform(&self, table: &(impl Table + ?Sized), param: Option<Param>) -> DoResult {
        let (key, factory) = self.resolve::<dyn DoHandler>(table)?;
        factory.call(&key, param)
    }

    /// Start the asynchronous action registered under `table`.
    ///
    /// `callback` runs at most once. Lookup failures are delivered before this
    /// call returns; otherwise the factory decides when and on which thread
    /// the outcome is delivered.
    pub fn perform_with(
        &self,
        table: &(impl Table + ?Sized),
        param: Option<Param>,
        callback: impl FnOnce(DoResult) + Send + 'static,
    ) {
        match self.resolve::<dyn AsyncDoHandler>(table) {
            Ok((key, factory)) => factory.call(&key, param, Box::new(callback) as DoCallback),
            Err(err) => callback(Err(err)),
        }
    }

    /// Fetch the value registered under `table` as a `V`.
    ///
    /// A value of any other type yields [`RouterError::TypeMismatch`].
    pub fn get<V: Any>(
        &self,
        table: &(impl Table + ?Sized),
        param: Option<Param>,
    ) -> GetResult<V> {
        let (key, factory) = self.resolve::<dyn GetHandler>(table)?;
        factory.call(&key, param)?.convert::<V>(&key)
    }

    /// Start producing the value registered under `table`, delivered as a `V`.
    pub fn get_with<V: Any>(
        &self,
        table: &(impl Table + ?Sized),
        param: Option<Param>,
        callback: impl FnOnce(GetResult<V>) + Send + 'static,
    ) {
        match self.resolve::<dyn AsyncGetHandler>(table) {
            Ok((key, factory)) => {
                let target = key.clone();
                let adapter: GetCallback = Box::new(move |result: GetResult<Value>| {
                    callback(result.and_then(|value| value.convert::<V>(&target)));
                });
                factory.call(&key, param, adapter);
            }
            Err(err) => callback(Err(err)),
        }
    }

    /// Every flavor that currently has a factory registered under `table`.
    pub fn flavors(&self, table: &(impl Table + ?Sized)) -> Flavors {
        let Some(key) = table.url() else {
            return Flavors::empty();
        };
        let provider = self.provider.as_ref();
        let mut flavors = Flavors::empty();
        flavors.set(Flavors::ACTION, has(provider.actions(), &key));
        flavors.set(Flavors::VALUE, has(provider.values(), &key));
        flavors.set(Flavors::ASYNC_ACTION, has(provider.async_actions(), &key));
        flavors.set(Flavors::ASYNC_VALUE, has(provider.async_values(), &key));
        flavors
    }

    fn resolve<H>(&self, table: &(impl Table + ?Sized)) -> Result<(Key, Arc<H>), RouterError>
    where
        H: Flavored + ?Sized,
    {
        let outcome = self.lookup::<H>(table);
        if let Err(err) = &outcome {
            log::dispatch_failed(H::FLAVOR, err);
        }
        outcome
    }

    fn lookup<H>(&self, table: &(impl Table + ?Sized)) -> Result<(Key, Arc<H>), RouterError>
    where
        H: Flavored + ?Sized,
    {
        let key = table.url().ok_or(RouterError::KeyMissing)?;
        let Some(registry) = H::registry(self.provider.as_ref()) else {
            return Err(RouterError::RegistryUnavailable { key });
        };
        match registry.lookup(&key) {
            Ok(Some(factory)) => Ok((key, factory)),
            Ok(None) => Err(RouterError::HandlerNotFound { key }),
            Err(_) => Err(RouterError::RegistryUnavailable { key }),
        }
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register an action factory; returns `true` when one was replaced.
    pub fn register_action<F>(
        &self,
        table: &(impl Table + ?Sized),
        factory: F,
    ) -> Result<bool, RouterError>
    where
        F: Fn(&Key, Option<Param>) -> DoResult + Send + Sync + 'static,
    {
        self.register_action_handler(table, factory)
    }

    /// Register an action factory implemented as a type.
    pub fn register_action_handler<H: DoHandler>(
        &self,
        table: &(impl Table + ?Sized),
        handler: H,
    ) -> Result<bool, RouterError> {
        self.install::<dyn DoHandler>(table, Arc::new(handler))
    }

    /// Register a value factory; returns `true` when one was replaced.
    pub fn register_value<F>(
        &self,
        table: &(impl Table + ?Sized),
        factory: F,
    ) -> Result<bool, RouterError>
    where
        F: Fn(&Key, Option<Param>) -> GetResult<Value> + Send + Sync + 'static,
    {
        self.register_value_handler(table, factory)
    }

    /// Register a value factory implemented as a type.
    pub fn register_value_handler<H: GetHandler>(
        &self,
        table: &(impl Table + ?Sized),
        handler: H,
    ) -> Result<bool, RouterError> {
        self.install::<dyn GetHandler>(table, Arc::new(handler))
    }

    /// Register an asynchronous action factory; returns `true` when one was replaced.
    pub fn register_async_action<F>(
        &self,
        table: &(impl Table + ?Sized),
        factory: F,
    ) -> Result<bool, RouterError>
    where
        F: Fn(&Key, Option<Param>, DoCallback) + Send + Sync + 'static,
    {
        self.register_async_action_handler(table, factory)
    }

    /// Register an asynchronous action factory implemented as a type.
    pub fn register_async_action_handler<H: AsyncDoHandler>(
        &self,
        table: &(impl Table + ?Sized),
        handler: H,
    ) -> Result<bool, RouterError> {
        self.install::<dyn AsyncDoHandler>(table, Arc::new(handler))
    }

    /// Register an asynchronous value factory; returns `true` when one was replaced.
    pub fn register_async_value<F>(
        &self,
        table: &(impl Table + ?Sized),
        factory: F,
    ) -> Result<bool, RouterError>
    where
        F: Fn(&Key, Option<Param>, GetCallback) + Send + Sync + 'static,
    {
        self.register_async_value_handler(table, factory)
    }

    /// Register an asynchronous value factory implemented as a type.
    pub fn register_async_value_handler<H: AsyncGetHandler>(
        &self,
        table: &(impl Table + ?Sized),
        handler: H,
    ) -> Result<bool, RouterError> {
        self.install::<dyn AsyncGetHandler>(table, Arc::new(handler))
    }

    fn install<H>(
        &self,
        table: &(impl Table + ?Sized),
        factory: Arc<H>,
    ) -> Result<bool, RouterError>
    where
        H: Flavored + ?Sized,
    {
        let outcome = table
            .url()
            .ok_or(RouterError::KeyMissing)
            .and_then(|key| {
                let registry = H::registry(self.provider.as_ref()).ok_or_else(|| {
                    RouterError::RegistryUnavailable { key: key.clone() }
                })?;
                let overwrote = registry
                    .insert(key.clone(), factory)
                    .map_err(|_| RouterError::RegistryUnavailable { key: key.clone() })?;
                log::registered(H::FLAVOR, &key, overwrote);
                Ok(overwrote)
            });
        if let Err(err) = &outcome {
            log::registration_refused(H::FLAVOR, err);
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Bootstrap
    // ------------------------------------------------------------------

    /// Register every component from the configured sources, once.
    ///
    /// The first call runs the pass and returns `Some(n)`, the number of
    /// components whose registration succeeded; concurrent first callers
    /// wait for that pass to finish. Every later call returns `None`.
    ///
    /// A component that returns an error or panics is logged and skipped; the
    /// rest of the pass still runs. A component must not call `bootstrap` on
    /// the router it is registering into.
    pub fn bootstrap(&self) -> Option<usize> {
        let mut registered = None;
        self.bootstrapped.call_once(|| {
            registered = Some(self.register_components());
        });
        registered
    }

    /// Check whether the bootstrap pass has completed.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.is_completed()
    }

    fn register_components(&self) -> usize {
        let mut registered = 0;
        let mut failed = 0;
        for source in &self.sources {
            for component in source.components() {
                match panic::catch_unwind(AssertUnwindSafe(|| component.register(self))) {
                    Ok(Ok(())) => registered += 1,
                    Ok(Err(err)) => {
                        log::component_failed(component.name(), &err);
                        failed += 1;
                    }
                    Err(_) => {
                        log::component_panicked(component.name());
                        failed += 1;
                    }
                }
            }
        }
        log::bootstrapped(registered, failed);
        registered
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("sources", &self.sources.len())
            .field("bootstrapped", &self.is_bootstrapped())
            .finish_non_exhaustive()
    }
}

fn has<H: ?Sized>(registry: Option<&FactoryMap<H>>, key: &str) -> bool {
    registry.is_some_and(|registry| registry.contains(key))
}

/// Builder for a [`Router`].
///
/// ```rust,ignore
/// let router = Router::builder()
///     .component(user::register)
///     .component(settings::register)
///     .build();
/// router.bootstrap();
/// ```
pub struct RouterBuilder {
    provider: Box<dyn FactoryProvider>,
    sources: Vec<Box<dyn ComponentSource>>,
    components: ComponentList,
}

impl RouterBuilder {
    /// Create a builder over empty in-memory [`Registries`].
    pub fn new() -> Self {
        Self {
            provider: Box::new(Registries::new()),
            sources: Vec::new(),
            components: ComponentList::new(),
        }
    }

    /// Replace the factory provider.
    pub fn provider<P: FactoryProvider>(mut self, provider: P) -> Self {
        self.provider = Box::new(provider);
        self
    }

    /// Add a single component to register at bootstrap.
    pub fn component<C: Component + 'static>(mut self, component: C) -> Self {
        self.components.push(component);
        self
    }

    /// Add a component source consulted at bootstrap.
    pub fn source<S: ComponentSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Discover components submitted with `submit_component!`.
    #[cfg(feature = "inventory")]
    pub fn discover(self) -> Self {
        self.source(crate::component::InventorySource)
    }

    /// Build the router.
    pub fn build(mut self) -> Router {
        if !self.components.is_empty() {
            self.sources.insert(0, Box::new(self.components));
        }
        Router {
            provider: self.provider,
            sources: self.sources,
            bootstrapped: Once::new(),
        }
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
