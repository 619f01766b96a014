//! Foundation layer: events and routing data shared by every other layer.

pub mod event;
pub mod route;

pub use event::{ApplicationErrorEvent, ErrorPayload, Event, RouteErrorEvent};
pub use route::RouteInfo;
