//! The front-controller lifecycle.
//!
//! An [`Application`] is built once at process entry, given its controllers,
//! and started once. Starting it walks a fixed state machine:
//!
//! ```text
//! NotStarted ──▶ Initializing ──▶ Dispatching ──▶ Done
//!                     │
//!                     └──▶ Aborted   (APP_PATH missing)
//! ```
//!
//! Initialization loads and validates configuration, installs logging and
//! the configured listeners. Dispatching resolves the request path through
//! the configured route handler and invokes the matching controller. Every
//! fault raised after the boot check, whether returned or panicked, is
//! escalated as an [`ApplicationErrorEvent`]; a route without controller is
//! escalated as a [`RouteErrorEvent`].
//!
//! # Example
//!
//! ```rust,ignore
//! use frontier_runtime::{Application, Environment};
//!
//! let mut app = Application::new();
//! app.register_default_controller::<BlogController>("app.controllers.Blog");
//!
//! let outcome = app.start(&Environment::from_process())?;
//! ```

use std::fmt;
use std::path::Path;

use frontier_core::{
    ApplicationErrorEvent, Controller, ControllerRegistry, Escalation, EventRegistry, Fault,
    FrameworkError, HandlerRegistry, RouteErrorEvent, RouteInfo, controller_identifier,
};
use tracing::{Level, debug, info, span};

use crate::boundary::catch_faults;
use crate::builtin::register_builtins;
use crate::config::{ConfigLoader, ConfigStore, HandlerConfig, LoggingConfig, validate_config};
use crate::environment::{Environment, RequestContext};
use crate::error::{BootResult, RuntimeError};
use crate::logging;

// =============================================================================
// Lifecycle Types
// =============================================================================

/// Where the application is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    NotStarted,
    Initializing,
    Dispatching,
    Done,
    /// A boot precondition failed.
    Aborted,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not_started",
            Self::Initializing => "initializing",
            Self::Dispatching => "dispatching",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Which path the request took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The controller's action result executed.
    Completed,
    /// No controller matched; `code` is the status after listeners ran.
    RouteNotFound { code: u16 },
    /// A fault was escalated as an application error.
    Faulted,
    /// `start` was called on an application that already started.
    AlreadyStarted,
}

// =============================================================================
// Application
// =============================================================================

/// The front controller.
#[derive(Debug)]
pub struct Application {
    state: LifecycleState,
    handlers: HandlerRegistry,
    controllers: ControllerRegistry,
    /// Replaces the application config file when set.
    overrides: Option<ConfigStore>,
    config: ConfigStore,
    events: EventRegistry,
    namespace: String,
    request: RequestContext,
    init_logging: bool,
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    /// Creates an application with the built-in handlers registered.
    pub fn new() -> Self {
        let mut handlers = HandlerRegistry::new();
        register_builtins(&mut handlers);

        Self {
            state: LifecycleState::NotStarted,
            handlers,
            controllers: ControllerRegistry::new(),
            overrides: None,
            config: ConfigStore::new(),
            events: EventRegistry::new(),
            namespace: String::new(),
            request: RequestContext::default(),
            init_logging: true,
        }
    }

    /// Uses `overrides` instead of the application config file.
    pub fn with_config(mut self, overrides: ConfigStore) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Leaves logging setup to the host.
    pub fn without_logging(mut self) -> Self {
        self.init_logging = false;
        self
    }

    /// Registers a controller constructor under a fully-qualified identifier.
    pub fn register_controller<F>(
        &mut self,
        identifier: impl Into<String>,
        factory: F,
    ) -> &mut Self
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.controllers.register(identifier, factory);
        self
    }

    /// Registers a `Default`-constructible controller.
    pub fn register_default_controller<C>(&mut self, identifier: impl Into<String>) -> &mut Self
    where
        C: Controller + Default + 'static,
    {
        self.controllers.register_default::<C>(identifier);
        self
    }

    /// Returns the handler registry for registering custom handlers.
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    /// Returns the event registry.
    ///
    /// Listeners added before `start` run ahead of the configured handlers.
    pub fn events_mut(&mut self) -> &mut EventRegistry {
        &mut self.events
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Returns the effective configuration; empty until initialized.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Returns the event registry.
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Returns the request inputs of the dispatch.
    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Returns the URL prefix under which the application is mounted.
    pub fn url_context(&self) -> &str {
        &self.request.url_context
    }

    /// Runs the lifecycle once.
    ///
    /// Returns [`BootError`](crate::BootError) only for a missing base path;
    /// every other failure is escalated through the event registry and
    /// reported as the outcome. A second call does nothing and returns
    /// [`DispatchOutcome::AlreadyStarted`].
    pub fn start(&mut self, env: &Environment) -> BootResult<DispatchOutcome> {
        if self.state != LifecycleState::NotStarted {
            debug!(state = %self.state, "Application already started");
            return Ok(DispatchOutcome::AlreadyStarted);
        }

        self.transition(LifecycleState::Initializing);
        let config_dir = match env.config_dir() {
            Ok(dir) => dir,
            Err(err) => {
                self.transition(LifecycleState::Aborted);
                return Err(err);
            }
        };
        self.request = env.request();

        let span = span!(Level::DEBUG, "request", path = %self.request.path);
        let _enter = span.enter();
        info!(path = %self.request.path, "Starting application");

        let outcome = match catch_faults(|| self.initialize(&config_dir)) {
            Ok(handlers) => {
                self.transition(LifecycleState::Dispatching);
                catch_faults(|| self.dispatch(&handlers.route_handler))
                    .unwrap_or_else(|fault| self.escalate_fault(fault))
            }
            Err(fault) => self.escalate_fault(fault),
        };

        self.transition(LifecycleState::Done);
        info!(outcome = ?outcome, "Application finished");
        Ok(outcome)
    }

    /// Resolves and invokes the controller for a route.
    ///
    /// A route without controller is escalated as a 404 route error and
    /// reported as [`DispatchOutcome::RouteNotFound`]. Faults raised by the
    /// controller are returned to the caller, as is an invalid namespace
    /// (for instance before `start` has set one).
    pub fn invoke_route(&self, route: &RouteInfo) -> Result<DispatchOutcome, Fault> {
        let identifier = match controller_identifier(&self.namespace, route.controller_name()) {
            Ok(id) => id,
            Err(err @ FrameworkError::InvalidNamespace(_)) => return Err(Box::new(err)),
            Err(err) => {
                debug!(error = %err, "Unresolvable controller name");
                return Ok(self.route_not_found(route, &err.to_string()));
            }
        };

        let Some(controller) = self.controllers.resolve(&identifier) else {
            return Ok(self.route_not_found(route, &identifier));
        };

        invoke_controller(controller.as_ref(), route)?;
        Ok(DispatchOutcome::Completed)
    }

    fn route_not_found(&self, route: &RouteInfo, detail: &str) -> DispatchOutcome {
        let event = RouteErrorEvent::not_found(format!(
            "No controller for '{}' with action '{}' ({detail})",
            route.controller_name(),
            route.action_name(),
        ));
        let code = Escalation::from(event)
            .escalate(&self.events)
            .http_error_code();
        DispatchOutcome::RouteNotFound { code }
    }

    fn initialize(&mut self, config_dir: &Path) -> Result<HandlerConfig, Fault> {
        let loader = match self.overrides.take() {
            Some(overrides) => ConfigLoader::new().overrides(overrides),
            None => ConfigLoader::new().config_dir(config_dir),
        };
        self.config = loader.load().map_err(RuntimeError::from)?;

        if self.init_logging
            && let Ok(logging_config) = LoggingConfig::from_store(&self.config)
        {
            logging::init_from_config(&logging_config);
        }
        validate_config(&self.config).map_err(RuntimeError::from)?;
        debug!(keys = self.config.len(), "Configuration loaded");

        let handlers = HandlerConfig::from_store(&self.config).map_err(RuntimeError::from)?;

        let error_handler = self
            .handlers
            .error_handler(&handlers.error_handler)
            .map_err(RuntimeError::from)?;
        self.events
            .register::<ApplicationErrorEvent, _>(move |event: &mut ApplicationErrorEvent| {
                error_handler.handle_error(event)
            });
        debug!(handler = %handlers.error_handler, "Installed application error listener");

        let route_error_handler = self
            .handlers
            .route_error_handler(&handlers.route_error_handler)
            .map_err(RuntimeError::from)?;
        self.events
            .register::<RouteErrorEvent, _>(move |event: &mut RouteErrorEvent| {
                route_error_handler.handle_error(event)
            });
        debug!(handler = %handlers.route_error_handler, "Installed route error listener");

        self.namespace.clone_from(&handlers.app_namespace);
        Ok(handlers)
    }

    fn dispatch(&self, route_handler: &str) -> Result<DispatchOutcome, Fault> {
        let route_handler = self
            .handlers
            .route_handler(route_handler)
            .map_err(RuntimeError::from)?;
        let route = route_handler.route_info(&self.request.path)?;
        debug!(route = %route, "Resolved route");

        self.invoke_route(&route)
    }

    fn escalate_fault(&self, fault: Fault) -> DispatchOutcome {
        Escalation::from(fault).escalate(&self.events);
        DispatchOutcome::Faulted
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!(from = %self.state, to = %next, "Lifecycle transition");
        self.state = next;
    }
}

/// Runs a controller's hook and executes the action result it returns.
pub fn invoke_controller(controller: &dyn Controller, route: &RouteInfo) -> Result<(), Fault> {
    let span = span!(
        Level::DEBUG,
        "action",
        controller = route.controller_name(),
        action = route.action_name()
    );
    let _enter = span.enter();

    let result = controller.before_action(route)?;
    result.execute()
}

// =============================================================================
// Tests
// =============================================================================
