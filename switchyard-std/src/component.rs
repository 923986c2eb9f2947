//! Registrable components.
//!
//! A [`Component`] is anything that wants to install factories when the router
//! boots. Components are found through [`ComponentSource`]s:
//!
//! - [`ComponentList`]: an explicit manifest assembled by the host application
//! - [`InventorySource`] (feature `inventory`): link-time collection of every
//!   [`Registration`] submitted with [`submit_component!`](crate::submit_component)
//!
//! Components are visited in unspecified order, so no component may rely on
//! another one having registered first.

use crate::router::Router;
use switchyard_core::RouterError;

/// A unit that registers its own factories on a router.
pub trait Component: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Install this component's factories.
    fn register(&self, router: &Router) -> Result<(), RouterError>;
}

impl<F> Component for F
where
    F: Fn(&Router) -> Result<(), RouterError> + Send + Sync,
{
    fn register(&self, router: &Router) -> Result<(), RouterError> {
        (self)(router)
    }
}

/// Enumerates the components a router should register at bootstrap.
pub trait ComponentSource: Send + Sync {
    /// All components known to this source.
    fn components(&self) -> Vec<&dyn Component>;
}

/// An explicit, host-assembled list of components.
#[derive(Default)]
pub struct ComponentList {
    components: Vec<Box<dyn Component>>,
}

impl ComponentList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component.
    pub fn with<C: Component + 'static>(mut self, component: C) -> Self {
        self.push(component);
        self
    }

    /// Add a component (mutable version).
    pub fn push<C: Component + 'static>(&mut self, component: C) {
        self.components.push(Box::new(component));
    }

    /// Number of components in the list.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentSource for ComponentList {
    fn components(&self) -> Vec<&dyn Component> {
        self.components.iter().map(|c| c.as_ref()).collect()
    }
}

/// A component entry collected at link time via `inventory`.
///
/// Usually created through [`submit_component!`](crate::submit_component).
pub struct Registration {
    name: &'static str,
    register: fn(&Router) -> Result<(), RouterError>,
}

impl Registration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, register: fn(&Router) -> Result<(), RouterError>) -> Self {
        Self { name, register }
    }
}

impl Component for Registration {
    fn name(&self) -> &str {
        self.name
    }

    fn register(&self, router: &Router) -> Result<(), RouterError> {
        (self.register)(router)
    }
}

#[cfg(feature = "inventory")]
inventory::collect!(Registration);

/// Source yielding every [`Registration`] linked into the binary.
#[cfg(feature = "inventory")]
#[derive(Debug, Default, Clone, Copy)]
pub struct InventorySource;

#[cfg(feature = "inventory")]
impl ComponentSource for InventorySource {
    fn components(&self) -> Vec<&dyn Component> {
        inventory::iter::<Registration>
            .into_iter()
            .map(|r| r as &dyn Component)
            .collect()
    }
}

/// Submit a registration function for link-time discovery.
///
/// The function must have the signature `fn(&Router) -> Result<(), RouterError>`.
///
/// ```rust,ignore
/// fn register_user(router: &Router) -> Result<(), RouterError> {
///     router.register_action("user/login", |_, _| Ok(()))?;
///     Ok(())
/// }
///
/// switchyard::submit_component!(register_user);
/// ```
#[cfg(feature = "inventory")]
#[macro_export]
macro_rules! submit_component {
    ($register:path) => {
        $crate::inventory::submit! {
            $crate::component::Registration::new(stringify!($register), $register)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named;

    impl Component for Named {
        fn register(&self, _router: &Router) -> Result<(), RouterError> {
            Ok(())
        }
    }

    fn plain(_router: &Router) -> Result<(), RouterError> {
        Ok(())
    }

    #[test]
    fn test_list_enumerates_in_insertion_order() {
        let list = ComponentList::new().with(Named).with(plain);
        assert_eq!(list.len(), 2);

        let names: Vec<_> = list.components().iter().map(|c| c.name().to_string()).collect();
        assert!(names[0].ends_with("Named"));
        assert!(names[1].contains("plain"));
    }

    #[test]
    fn test_registration_name() {
        let registration = Registration::new("user", plain);
        assert_eq!(registration.name(), "user");
        assert!(registration.register(&Router::new()).is_ok());
    }
}
