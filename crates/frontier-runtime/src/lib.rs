//! Frontier Runtime - Orchestration layer for the Frontier front controller.
//!
//! This crate provides:
//! - Configuration loading, merging and validation (`config`)
//! - Logging setup driven by the `LOG_*` keys (`logging`)
//! - Process preconditions and request inputs (`Environment`)
//! - The built-in route and error handlers (`builtin`)
//! - The fault boundary and the `Application` lifecycle
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use frontier_runtime::{Application, Environment};
//!
//! let mut app = Application::new();
//! app.register_default_controller::<HomeController>("app.controllers.Home");
//!
//! match app.start(&Environment::from_process()) {
//!     Ok(outcome) => tracing::debug!(?outcome, "Request handled"),
//!     Err(boot) => eprintln!("{boot}"),
//! }
//! ```

pub mod application;
pub mod boundary;
pub mod builtin;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;

// Re-exports
pub use application::{Application, DispatchOutcome, LifecycleState, invoke_controller};
pub use boundary::catch_faults;
pub use builtin::{LogErrorHandler, LogRouteErrorHandler, PathRouteHandler, register_builtins};
pub use config::{ConfigError, ConfigLoader, ConfigResult, ConfigStore};
pub use environment::{Environment, RequestContext};
pub use error::{BootError, BootResult, RuntimeError};
pub use logging::LoggingBuilder;

// Re-export tracing for use by other crates
pub use tracing;

/// Prelude module for convenient imports.
///
/// This provides the commonly used logging macros and `Level`.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, span, trace, warn};
}
