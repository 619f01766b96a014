//! # Frontier
//!
//! A small, explicitly wired front controller.
//!
//! ## Overview
//!
//! One process handles one request. The [`Application`](runtime::Application)
//! loads configuration, installs the configured listeners, resolves the
//! request path into a route and invokes the matching controller. Failures
//! never unwind out of [`run`]: a missing controller becomes a route error
//! event and every other fault becomes an application error event.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Environment │────▶│ Application  │────▶│ RouteHandler │────▶│  Controller  │──▶ ActionResult
//! └─────────────┘     │ (lifecycle)  │     └──────────────┘     └──────────────┘
//!                     └──────┬───────┘
//!                            │ faults / missing controller
//!                            ▼
//!                     ┌──────────────┐
//!                     │EventRegistry │──▶ ErrorHandler / RouteErrorHandler
//!                     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use frontier::prelude::*;
//!
//! #[derive(Default)]
//! struct Home;
//!
//! impl Controller for Home {
//!     fn before_action(&self, _route: &RouteInfo) -> Result<BoxedActionResult, Fault> {
//!         Ok(Box::new(|| -> Result<(), Fault> {
//!             println!("Hello");
//!             Ok(())
//!         }))
//!     }
//! }
//!
//! fn main() {
//!     let mut app = Application::new();
//!     app.register_default_controller::<Home>("app.controllers.Home");
//!     frontier::run(app);
//! }
//! ```
//!
//! ## Features
//!
//! - `yaml-config`: also read `config.yaml` / `config.yml`
//! - `json-log`: enable `LOG_FORMAT = "json"`

pub use frontier_core as core;
pub use frontier_runtime as runtime;

use frontier_runtime::{Application, DispatchOutcome, Environment};

/// Runs the application against the process environment.
///
/// A [`BootError`](runtime::BootError) is printed to stderr and terminates
/// the process with status 1. Every other outcome is returned.
pub fn run(application: Application) -> DispatchOutcome {
    run_with(application, &Environment::from_process())
}

/// Runs the application against an explicit environment.
///
/// Exits like [`run`] on a boot error.
pub fn run_with(mut application: Application, env: &Environment) -> DispatchOutcome {
    match application.start(env) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use frontier::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use frontier_runtime::{Application, ConfigStore, DispatchOutcome, Environment};

    // Controllers and handlers
    pub use frontier_core::{
        ActionResult, BoxedActionResult, Controller, ErrorHandler, Fault, RouteErrorHandler,
        RouteHandler, RouteInfo, Signal,
    };

    // Events
    pub use frontier_core::{ApplicationErrorEvent, ErrorPayload, RouteErrorEvent};

    // Logging macros
    pub use frontier_runtime::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::run_with;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Flag(Arc<AtomicBool>);

    impl Controller for Flag {
        fn before_action(&self, _route: &RouteInfo) -> Result<BoxedActionResult, Fault> {
            let flag = Arc::clone(&self.0);
            Ok(Box::new(move || -> Result<(), Fault> {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            }))
        }
    }

    #[test]
    fn test_run_with_dispatches() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let mut app = Application::new().without_logging();
        app.register_controller("app.controllers.Home", move || {
            Box::new(Flag(Arc::clone(&flag))) as Box<dyn Controller>
        });

        let env = Environment::new()
            .with_app_path("/nonexistent/frontier-app")
            .with_request_uri("/home");

        assert_eq!(run_with(app, &env), DispatchOutcome::Completed);
        assert!(ran.load(Ordering::SeqCst));
    }
}
