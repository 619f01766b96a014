//! Runtime error types.

use frontier_core::FrameworkError;
use thiserror::Error;

use crate::config::ConfigError;

/// A fatal precondition failure.
///
/// Boot errors are raised before any listener exists and never reach the
/// event system; the process entry point prints them and exits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootError {
    /// The base application path was not provided.
    #[error("APP_PATH is not defined; set it to the application base directory")]
    MissingAppPath,
}

/// Errors that can occur while initializing the application.
///
/// These are converted into application error events at the fault boundary.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Loading or validating configuration failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A configured identifier could not be resolved.
    #[error("Framework error: {0}")]
    Framework(#[from] FrameworkError),
}

/// Result type for boot checks.
pub type BootResult<T> = Result<T, BootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_error_names_the_variable() {
        assert!(BootError::MissingAppPath.to_string().starts_with("APP_PATH"));
    }

    #[test]
    fn test_runtime_error_from_config() {
        let err: RuntimeError = ConfigError::missing_key("ROUTE_HANDLER").into();
        assert!(matches!(err, RuntimeError::Config(_)));
        assert!(err.to_string().contains("ROUTE_HANDLER"));
    }
}
