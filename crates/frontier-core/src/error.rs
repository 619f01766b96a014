//! Unified error types for the Frontier core.
//!
//! Collaborators (route handlers, controllers, action results) report failures
//! as a [`Fault`]. The runtime never inspects a fault beyond wrapping it into an
//! application error event, with one exception: a [`Signal`] asks for a
//! synthesized `(code, message)` payload instead of a wrapped fault.

use std::any::Any;

use thiserror::Error;

/// The error type returned by collaborator code.
pub type Fault = Box<dyn std::error::Error + Send + Sync + 'static>;

// =============================================================================
// Framework Errors
// =============================================================================

/// Errors raised by the framework's own lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameworkError {
    /// No constructor is registered under the identifier.
    #[error("unknown {kind} identifier: '{identifier}'")]
    UnknownIdentifier {
        /// The capability being looked up (e.g. "error handler").
        kind: &'static str,
        /// The identifier that was requested.
        identifier: String,
    },

    /// The dotted controller name has an empty segment.
    #[error("invalid controller name: '{0}'")]
    InvalidControllerName(String),

    /// The application namespace has an empty segment.
    #[error("invalid application namespace: '{0}'")]
    InvalidNamespace(String),
}

impl FrameworkError {
    /// Creates an unknown identifier error.
    pub fn unknown(kind: &'static str, identifier: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            kind,
            identifier: identifier.into(),
        }
    }
}

// =============================================================================
// Fault Variants
// =============================================================================

/// A non-fatal runtime signal carrying an explicit code.
///
/// Returning a `Signal` as a [`Fault`] produces an application error event
/// with a custom `(code, message)` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("runtime signal {code}: {message}")]
pub struct Signal {
    /// Signal code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

impl Signal {
    /// Creates a new signal.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A panic caught by the fault boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panic: {message}")]
pub struct PanicFault {
    /// The panic message, or a placeholder for non-string payloads.
    pub message: String,
}

impl PanicFault {
    /// Builds a fault from the payload returned by `catch_unwind`.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Result type for framework lookups.
pub type FrameworkResult<T> = Result<T, FrameworkError>;
