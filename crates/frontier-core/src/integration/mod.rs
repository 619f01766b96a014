//! Integration layer: the collaborators the application invokes.
//!
//! - **Handlers**: error, route and route-error handlers selected by config
//! - **Controllers**: request handlers selected by route
//! - **Factories**: identifier → constructor lookup for both

pub mod controller;
pub mod factory;
pub mod handler;

pub use controller::{
    ActionResult, BoxedActionResult, BoxedController, CONTROLLERS_SEGMENT, Controller,
    ControllerRegistry, controller_identifier,
};
pub use factory::{Factory, FactoryMap};
pub use handler::{
    BoxedErrorHandler, BoxedRouteErrorHandler, BoxedRouteHandler, ErrorHandler, HandlerRegistry,
    RouteErrorHandler, RouteHandler,
};
