//! Event types for the Frontier error channels.
//!
//! Two event kinds exist:
//!
//! - [`ApplicationErrorEvent`] - a runtime fault or a synthesized
//!   `(code, message)` pair, delivered to the configured error handler.
//! - [`RouteErrorEvent`] - a request that could not be routed to a
//!   controller, delivered to the configured route error handler.
//!
//! Events are created at the fault site, passed by `&mut` to every listener
//! of their kind, and dropped after dispatch.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{Fault, Signal};

// ============================================================================
// Core Event Trait
// ============================================================================

/// The base trait for all events dispatched through the
/// [`EventRegistry`](crate::EventRegistry).
///
/// The registry keys listeners on the concrete event type, so two event
/// types never share listeners.
pub trait Event: Any + Send + Sync + fmt::Debug {
    /// Returns the human-readable name of this event type.
    fn event_name(&self) -> &'static str;
}

// ============================================================================
// Application Errors
// ============================================================================

/// Payload of an [`ApplicationErrorEvent`].
#[derive(Clone)]
pub enum ErrorPayload {
    /// A captured fault object.
    Fault(Arc<dyn std::error::Error + Send + Sync>),
    /// A synthesized code and message from a non-fatal runtime signal.
    Custom {
        /// Signal code.
        code: i64,
        /// Signal message.
        message: String,
    },
}

impl fmt::Debug for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault(fault) => f.debug_tuple("Fault").field(&fault.to_string()).finish(),
            Self::Custom { code, message } => f
                .debug_struct("Custom")
                .field("code", code)
                .field("message", message)
                .finish(),
        }
    }
}

/// Raised when a runtime fault escapes initialization, route resolution or
/// controller invocation.
#[derive(Debug, Clone)]
pub struct ApplicationErrorEvent {
    /// HTTP status a handler should respond with. Listeners may rewrite it.
    pub http_error_code: u16,
    payload: ErrorPayload,
}

impl ApplicationErrorEvent {
    /// Wraps a fault.
    ///
    /// A [`Signal`] is unwrapped into a custom payload so handlers see its
    /// code directly.
    pub fn new(fault: Fault) -> Self {
        match fault.downcast::<Signal>() {
            Ok(signal) => Self::custom(signal.code, signal.message),
            Err(fault) => Self {
                http_error_code: 500,
                payload: ErrorPayload::Fault(Arc::from(fault)),
            },
        }
    }

    /// Creates an event from a synthesized code and message.
    pub fn custom(code: i64, message: impl Into<String>) -> Self {
        Self {
            http_error_code: 500,
            payload: ErrorPayload::Custom {
                code,
                message: message.into(),
            },
        }
    }

    /// Returns the payload.
    pub fn payload(&self) -> &ErrorPayload {
        &self.payload
    }

    /// Returns the wrapped fault, if this event carries one.
    pub fn fault(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match &self.payload {
            ErrorPayload::Fault(fault) => Some(fault.as_ref()),
            ErrorPayload::Custom { .. } => None,
        }
    }

    /// Returns the signal code, if this event carries a custom payload.
    pub fn code(&self) -> Option<i64> {
        match &self.payload {
            ErrorPayload::Fault(_) => None,
            ErrorPayload::Custom { code, .. } => Some(*code),
        }
    }

    /// Returns a human-readable description of the payload.
    pub fn message(&self) -> String {
        match &self.payload {
            ErrorPayload::Fault(fault) => fault.to_string(),
            ErrorPayload::Custom { message, .. } => message.clone(),
        }
    }
}

impl Event for ApplicationErrorEvent {
    fn event_name(&self) -> &'static str {
        "application_error"
    }
}

// ============================================================================
// Route Errors
// ============================================================================

/// Raised when a resolved route has no matching controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteErrorEvent {
    /// HTTP-style error code. Listeners may rewrite it.
    pub http_error_code: u16,
    message: String,
}

impl RouteErrorEvent {
    /// Creates a route error with an explicit code.
    pub fn custom(http_error_code: u16, message: impl Into<String>) -> Self {
        Self {
            http_error_code,
            message: message.into(),
        }
    }

    /// Creates a 404 route error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::custom(404, message)
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Event for RouteErrorEvent {
    fn event_name(&self) -> &'static str {
        "route_error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PanicFault;

    #[test]
    fn test_fault_payload_keeps_source() {
        let fault: Fault = Box::new(PanicFault {
            message: "boom".into(),
        });
        let event = ApplicationErrorEvent::new(fault);

        assert_eq!(event.http_error_code, 500);
        assert_eq!(event.message(), "panic: boom");
        assert!(event.code().is_none());
        let inner = event.fault().expect("fault payload");
        assert!(inner.downcast_ref::<PanicFault>().is_some());
    }

    #[test]
    fn test_signal_becomes_custom_payload() {
        let event = ApplicationErrorEvent::new(Box::new(Signal::new(8, "undefined index")));

        assert_eq!(event.code(), Some(8));
        assert_eq!(event.message(), "undefined index");
        assert!(event.fault().is_none());
    }

    #[test]
    fn test_route_error_not_found() {
        let event = RouteErrorEvent::not_found("missing");
        assert_eq!(event.http_error_code, 404);
        assert_eq!(event.message(), "missing");
        assert_eq!(event.event_name(), "route_error");
    }
}
