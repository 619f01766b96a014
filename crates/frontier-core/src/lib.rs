//! # Frontier Core
//!
//! The core engine of the Frontier front controller.
//!
//! This crate provides the building blocks the runtime wires together:
//! event types, the event registry, and the collaborator contracts.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! - **Events**: [`ApplicationErrorEvent`], [`RouteErrorEvent`]
//! - **Routing data**: [`RouteInfo`]
//!
//! ### Framework Layer
//!
//! - **Event Registry**: ordered, kind-keyed listener dispatch ([`EventRegistry`])
//! - **Escalation**: one funnel for both failure channels ([`Escalation`])
//!
//! ### Integration Layer
//!
//! - **Handlers**: [`ErrorHandler`], [`RouteHandler`], [`RouteErrorHandler`]
//! - **Controllers**: [`Controller`], [`ActionResult`]
//! - **Lookup**: [`HandlerRegistry`], [`ControllerRegistry`]
//!
//! ## Failure Channels
//!
//! ```text
//! ┌──────────────┐   fault    ┌────────────┐     ┌──────────────────┐
//! │  Controller  │───────────▶│ Escalation │────▶│  EventRegistry   │──▶ ErrorHandler
//! └──────────────┘            │            │     │                  │
//! ┌──────────────┐  not found │            │     │                  │
//! │  Resolution  │───────────▶│            │────▶│                  │──▶ RouteErrorHandler
//! └──────────────┘            └────────────┘     └──────────────────┘
//! ```

pub mod error;
pub mod foundation;
pub mod framework;
pub mod integration;

pub use error::{Fault, FrameworkError, FrameworkResult, PanicFault, Signal};

pub use foundation::{ApplicationErrorEvent, ErrorPayload, Event, RouteErrorEvent, RouteInfo};

pub use framework::{Escalation, EventRegistry, Listener};

pub use integration::{
    ActionResult, BoxedActionResult, BoxedController, BoxedErrorHandler, BoxedRouteErrorHandler,
    BoxedRouteHandler, CONTROLLERS_SEGMENT, Controller, ControllerRegistry, ErrorHandler, Factory,
    FactoryMap, HandlerRegistry, RouteErrorHandler, RouteHandler, controller_identifier,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::error::{Fault, Signal};
    pub use super::foundation::*;
    pub use super::integration::{
        ActionResult, BoxedActionResult, Controller, ErrorHandler, RouteErrorHandler,
        RouteHandler,
    };
}
