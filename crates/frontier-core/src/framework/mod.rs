//! Framework layer: event dispatch and failure escalation.

pub mod escalation;
pub mod registry;

pub use escalation::Escalation;
pub use registry::{EventRegistry, Listener};
