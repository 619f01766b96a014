//! Controllers, action results and controller lookup.
//!
//! A controller's [`before_action`](Controller::before_action) hook turns a
//! [`RouteInfo`] into an [`ActionResult`]; executing the result performs the
//! response side effect. A controller rejects a request by returning a result
//! that renders the rejection, never by returning nothing.
//!
//! Controllers are looked up by fully-qualified identifier:
//!
//! ```text
//! APP_NAMESPACE = "App", controller_name = "admin.users"
//!     → "App.controllers.admin.Users"
//! ```

use tracing::trace;

use crate::error::{Fault, FrameworkError, FrameworkResult};
use crate::foundation::route::RouteInfo;
use crate::integration::factory::FactoryMap;

/// Namespace segment inserted between the application namespace and the
/// controller path.
pub const CONTROLLERS_SEGMENT: &str = "controllers";

/// The side-effecting outcome of a controller hook.
///
/// Any `FnOnce() -> Result<(), Fault>` closure is an action result.
pub trait ActionResult: Send {
    /// Performs the response side effect.
    fn execute(self: Box<Self>) -> Result<(), Fault>;
}

impl<F> ActionResult for F
where
    F: FnOnce() -> Result<(), Fault> + Send,
{
    fn execute(self: Box<Self>) -> Result<(), Fault> {
        (*self)()
    }
}

/// Boxed action result.
pub type BoxedActionResult = Box<dyn ActionResult>;

/// A request handler selected by route.
pub trait Controller: Send + Sync {
    /// Produces the action result for a route.
    fn before_action(&self, route: &RouteInfo) -> Result<BoxedActionResult, Fault>;
}

/// Boxed controller.
pub type BoxedController = Box<dyn Controller>;

/// Builds the fully-qualified controller identifier for a route.
///
/// Each dotted segment of `controller_name` becomes one namespace level and
/// the final segment is capitalized.
pub fn controller_identifier(namespace: &str, controller_name: &str) -> FrameworkResult<String> {
    if namespace.split('.').any(str::is_empty) {
        return Err(FrameworkError::InvalidNamespace(namespace.to_string()));
    }

    let segments: Vec<&str> = controller_name.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(FrameworkError::InvalidControllerName(
            controller_name.to_string(),
        ));
    }

    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| FrameworkError::InvalidControllerName(controller_name.to_string()))?;

    let mut identifier = format!("{namespace}.{CONTROLLERS_SEGMENT}");
    for parent in parents {
        identifier.push('.');
        identifier.push_str(parent);
    }
    identifier.push('.');
    identifier.push_str(&capitalize(last));

    trace!(controller = controller_name, identifier = %identifier, "Built controller identifier");
    Ok(identifier)
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fully-qualified identifier → controller constructor.
#[derive(Debug)]
pub struct ControllerRegistry {
    controllers: FactoryMap<dyn Controller>,
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            controllers: FactoryMap::new("controller"),
        }
    }

    /// Registers a controller constructor under a fully-qualified identifier.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> BoxedController + Send + Sync + 'static,
    {
        self.controllers.register(identifier, factory);
    }

    /// Registers a `Default`-constructible controller.
    pub fn register_default<C>(&mut self, identifier: impl Into<String>)
    where
        C: Controller + Default + 'static,
    {
        self.controllers
            .register(identifier, || Box::new(C::default()) as BoxedController);
    }

    /// Constructs the controller registered under `identifier`, if any.
    pub fn resolve(&self, identifier: &str) -> Option<BoxedController> {
        self.controllers.create(identifier).ok()
    }

    /// Returns whether a controller is registered under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.controllers.contains(identifier)
    }

    /// Returns all registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        self.controllers.identifiers()
    }

    /// Returns the number of registered controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Returns whether no controller is registered.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_identifier_nested() {
        assert_eq!(
            controller_identifier("App", "admin.users").unwrap(),
            "App.controllers.admin.Users"
        );
    }

    #[test]
    fn test_identifier_single_segment() {
        assert_eq!(
            controller_identifier("shop", "cart").unwrap(),
            "shop.controllers.Cart"
        );
    }

    #[test]
    fn test_identifier_rejects_empty_segments() {
        assert_eq!(
            controller_identifier("App", "admin..users"),
            Err(FrameworkError::InvalidControllerName("admin..users".into()))
        );
        assert_eq!(
            controller_identifier("App", ""),
            Err(FrameworkError::InvalidControllerName(String::new()))
        );
        assert_eq!(
            controller_identifier("", "home"),
            Err(FrameworkError::InvalidNamespace(String::new()))
        );
    }

    #[derive(Default)]
    struct Counting {
        executed: Arc<AtomicUsize>,
    }

    impl Controller for Counting {
        fn before_action(&self, _route: &RouteInfo) -> Result<BoxedActionResult, Fault> {
            let executed = Arc::clone(&self.executed);
            Ok(Box::new(move || -> Result<(), Fault> {
                executed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
        }
    }

    #[test]
    fn test_closure_action_result_executes() {
        let executed = Arc::new(AtomicUsize::new(0));
        let controller = Counting {
            executed: Arc::clone(&executed),
        };

        let result = controller
            .before_action(&RouteInfo::new("home", "index"))
            .unwrap();
        result.execute().unwrap();

        assert_eq!(executed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registry_resolve() {
        let mut registry = ControllerRegistry::new();
        registry.register_default::<Counting>("App.controllers.Home");

        assert!(registry.resolve("App.controllers.Home").is_some());
        assert!(registry.resolve("App.controllers.Missing").is_none());
        assert_eq!(registry.len(), 1);
    }
}
