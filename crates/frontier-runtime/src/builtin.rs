//! Built-in handlers selected by the framework defaults.

use frontier_core::{
    ApplicationErrorEvent, BoxedErrorHandler, BoxedRouteErrorHandler, BoxedRouteHandler,
    ErrorHandler, Fault, HandlerRegistry, RouteErrorEvent, RouteErrorHandler, RouteHandler,
    RouteInfo,
};
use tracing::{error, trace, warn};

/// Identifier of [`LogErrorHandler`].
pub const LOG_ERROR_HANDLER: &str = "frontier.handlers.LogErrorHandler";
/// Identifier of [`PathRouteHandler`].
pub const PATH_ROUTE_HANDLER: &str = "frontier.handlers.PathRouteHandler";
/// Identifier of [`LogRouteErrorHandler`].
pub const LOG_ROUTE_ERROR_HANDLER: &str = "frontier.handlers.LogRouteErrorHandler";

/// Controller and action used for missing path segments.
pub const INDEX: &str = "index";

/// Registers every built-in handler under its identifier.
pub fn register_builtins(handlers: &mut HandlerRegistry) {
    handlers.register_error_handler(LOG_ERROR_HANDLER, || {
        Box::new(LogErrorHandler) as BoxedErrorHandler
    });
    handlers.register_route_handler(PATH_ROUTE_HANDLER, || {
        Box::new(PathRouteHandler) as BoxedRouteHandler
    });
    handlers.register_route_error_handler(LOG_ROUTE_ERROR_HANDLER, || {
        Box::new(LogRouteErrorHandler) as BoxedRouteErrorHandler
    });
}

// =============================================================================
// Routing
// =============================================================================

/// Maps `/a/b/c?x=1` to controller `a.b`, action `c`, parameter `x = 1`.
///
/// A single segment names the controller and selects its `index` action;
/// an empty path routes to `index`/`index`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathRouteHandler;

impl RouteHandler for PathRouteHandler {
    fn route_info(&self, path: &str) -> Result<RouteInfo, Fault> {
        let path = path.split('#').next().unwrap_or_default();
        let (path, query) = path.split_once('?').unwrap_or((path, ""));

        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (controller, action) = match segments.len() {
            0 => (INDEX.to_string(), INDEX.to_string()),
            1 => (segments[0].to_string(), INDEX.to_string()),
            _ => {
                let action = segments.pop().unwrap_or(INDEX).to_string();
                (segments.join("."), action)
            }
        };

        let parameters = url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()));
        let route = RouteInfo::new(controller, action).with_parameters(parameters);
        trace!(route = %route, parameters = route.parameters().len(), "Resolved path");
        Ok(route)
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Logs application errors at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorHandler;

impl ErrorHandler for LogErrorHandler {
    fn handle_error(&self, event: &mut ApplicationErrorEvent) {
        match event.code() {
            Some(code) => error!(code, http_code = event.http_error_code, "{}", event.message()),
            None => error!(http_code = event.http_error_code, "{}", event.message()),
        }
    }
}

/// Logs route errors at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRouteErrorHandler;

impl RouteErrorHandler for LogRouteErrorHandler {
    fn handle_error(&self, event: &mut RouteErrorEvent) {
        warn!(http_code = event.http_error_code, "{}", event.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> RouteInfo {
        PathRouteHandler.route_info(path).unwrap()
    }

    #[test]
    fn test_path_routing() {
        assert_eq!(route("/"), RouteInfo::new("index", "index"));
        assert_eq!(route(""), RouteInfo::new("index", "index"));
        assert_eq!(route("/blog"), RouteInfo::new("blog", "index"));
        assert_eq!(route("/blog/show/"), RouteInfo::new("blog", "show"));
        assert_eq!(
            route("/admin/users/edit"),
            RouteInfo::new("admin.users", "edit")
        );
        assert_eq!(route("//admin//users"), RouteInfo::new("admin", "users"));
    }

    #[test]
    fn test_query_becomes_parameters() {
        let info = route("/blog/show?id=42&tag=rust%20lang#comments");
        assert_eq!(info.controller_name(), "blog");
        assert_eq!(info.action_name(), "show");
        assert_eq!(info.parameter("id"), Some("42"));
        assert_eq!(info.parameter("tag"), Some("rust lang"));
        assert_eq!(info.parameters().len(), 2);
    }

    #[test]
    fn test_fragment_without_query() {
        assert_eq!(route("/blog#top"), RouteInfo::new("blog", "index"));
    }

    #[test]
    fn test_builtins_registered() {
        let mut handlers = HandlerRegistry::new();
        register_builtins(&mut handlers);

        assert!(handlers.error_handler(LOG_ERROR_HANDLER).is_ok());
        assert!(handlers.route_handler(PATH_ROUTE_HANDLER).is_ok());
        assert!(handlers.route_error_handler(LOG_ROUTE_ERROR_HANDLER).is_ok());
    }

    #[test]
    fn test_log_handlers_leave_event_untouched() {
        let mut event = RouteErrorEvent::not_found("missing");
        LogRouteErrorHandler.handle_error(&mut event);
        assert_eq!(event.http_error_code, 404);

        let mut event = ApplicationErrorEvent::custom(3, "signal");
        LogErrorHandler.handle_error(&mut event);
        assert_eq!(event.code(), Some(3));
    }
}
