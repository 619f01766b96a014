//! Handler capabilities selected by configuration.
//!
//! The configuration names one implementation of each trait by identifier:
//!
//! | key | trait |
//! |---|---|
//! | `ERROR_HANDLER` | [`ErrorHandler`] |
//! | `ROUTE_HANDLER` | [`RouteHandler`] |
//! | `ROUTE_ERROR_HANDLER` | [`RouteErrorHandler`] |
//!
//! The [`HandlerRegistry`] resolves those identifiers to instances.

use crate::error::{Fault, FrameworkResult};
use crate::foundation::event::{ApplicationErrorEvent, RouteErrorEvent};
use crate::foundation::route::RouteInfo;
use crate::integration::factory::FactoryMap;

/// Receives application error events.
pub trait ErrorHandler: Send + Sync {
    /// Handles an application error.
    fn handle_error(&self, event: &mut ApplicationErrorEvent);
}

/// Receives route error events.
pub trait RouteErrorHandler: Send + Sync {
    /// Handles a route error.
    fn handle_error(&self, event: &mut RouteErrorEvent);
}

/// Resolves request paths into routing decisions.
pub trait RouteHandler: Send + Sync {
    /// Returns the route for a request target (path plus optional query).
    fn route_info(&self, path: &str) -> Result<RouteInfo, Fault>;
}

/// Boxed error handler.
pub type BoxedErrorHandler = Box<dyn ErrorHandler>;
/// Boxed route error handler.
pub type BoxedRouteErrorHandler = Box<dyn RouteErrorHandler>;
/// Boxed route handler.
pub type BoxedRouteHandler = Box<dyn RouteHandler>;

/// Identifier → constructor mapping for every handler capability.
#[derive(Debug)]
pub struct HandlerRegistry {
    error_handlers: FactoryMap<dyn ErrorHandler>,
    route_handlers: FactoryMap<dyn RouteHandler>,
    route_error_handlers: FactoryMap<dyn RouteErrorHandler>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            error_handlers: FactoryMap::new("error handler"),
            route_handlers: FactoryMap::new("route handler"),
            route_error_handlers: FactoryMap::new("route error handler"),
        }
    }

    /// Registers an error handler constructor.
    pub fn register_error_handler<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> BoxedErrorHandler + Send + Sync + 'static,
    {
        self.error_handlers.register(identifier, factory);
    }

    /// Registers a route handler constructor.
    pub fn register_route_handler<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> BoxedRouteHandler + Send + Sync + 'static,
    {
        self.route_handlers.register(identifier, factory);
    }

    /// Registers a route error handler constructor.
    pub fn register_route_error_handler<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> BoxedRouteErrorHandler + Send + Sync + 'static,
    {
        self.route_error_handlers.register(identifier, factory);
    }

    /// Constructs the error handler registered under `identifier`.
    pub fn error_handler(&self, identifier: &str) -> FrameworkResult<BoxedErrorHandler> {
        self.error_handlers.create(identifier)
    }

    /// Constructs the route handler registered under `identifier`.
    pub fn route_handler(&self, identifier: &str) -> FrameworkResult<BoxedRouteHandler> {
        self.route_handlers.create(identifier)
    }

    /// Constructs the route error handler registered under `identifier`.
    pub fn route_error_handler(&self, identifier: &str) -> FrameworkResult<BoxedRouteErrorHandler> {
        self.route_error_handlers.create(identifier)
    }

    /// Returns the error handler map.
    pub fn error_handlers(&self) -> &FactoryMap<dyn ErrorHandler> {
        &self.error_handlers
    }

    /// Returns the route handler map.
    pub fn route_handlers(&self) -> &FactoryMap<dyn RouteHandler> {
        &self.route_handlers
    }

    /// Returns the route error handler map.
    pub fn route_error_handlers(&self) -> &FactoryMap<dyn RouteErrorHandler> {
        &self.route_error_handlers
    }
}
