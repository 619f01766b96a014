//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{HandlerConfig, LogOutput, LoggingConfig, keys};
use super::store::ConfigStore;

/// Validates the effective configuration.
pub fn validate_config(store: &ConfigStore) -> ConfigResult<()> {
    validate_handler_config(&HandlerConfig::from_store(store)?)?;
    validate_logging_config(&LoggingConfig::from_store(store)?)?;
    Ok(())
}

/// Validates handler identifiers and the application namespace.
fn validate_handler_config(config: &HandlerConfig) -> ConfigResult<()> {
    for (key, identifier) in [
        (keys::ERROR_HANDLER, &config.error_handler),
        (keys::ROUTE_HANDLER, &config.route_handler),
        (keys::ROUTE_ERROR_HANDLER, &config.route_error_handler),
    ] {
        if identifier.trim().is_empty() {
            return Err(ConfigError::validation(format!("{key} cannot be empty")));
        }
    }

    validate_namespace(&config.app_namespace)
}

/// Validates a dotted namespace.
fn validate_namespace(namespace: &str) -> ConfigResult<()> {
    if namespace.is_empty() {
        return Err(ConfigError::validation("APP_NAMESPACE cannot be empty"));
    }

    if namespace
        .split('.')
        .any(|segment| segment.is_empty() || segment.contains(char::is_whitespace))
    {
        return Err(ConfigError::validation(format!(
            "APP_NAMESPACE '{namespace}' must be dot-separated non-empty segments"
        )));
    }

    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(config: &LoggingConfig) -> ConfigResult<()> {
    if config.output == LogOutput::File && config.file_path.is_none() {
        return Err(ConfigError::validation(
            "LOG_OUTPUT is 'file' but LOG_FILE is not set",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_store() -> ConfigStore {
        ConfigStore::new()
            .with(keys::ERROR_HANDLER, "frontier.handlers.LogErrorHandler")
            .with(keys::ROUTE_HANDLER, "frontier.handlers.PathRouteHandler")
            .with(
                keys::ROUTE_ERROR_HANDLER,
                "frontier.handlers.LogRouteErrorHandler",
            )
            .with(keys::APP_NAMESPACE, "App")
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_store()).is_ok());
    }

    #[test]
    fn test_validate_empty_handler() {
        let store = valid_store().with(keys::ROUTE_HANDLER, "  ");
        assert!(matches!(
            validate_config(&store),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_validate_bad_namespace() {
        let store = valid_store().with(keys::APP_NAMESPACE, "App..web");
        assert!(validate_config(&store).is_err());

        let store = valid_store().with(keys::APP_NAMESPACE, "my app");
        assert!(validate_config(&store).is_err());
    }

    #[test]
    fn test_validate_file_output_requires_path() {
        let store = valid_store().with(keys::LOG_OUTPUT, "file");
        assert!(validate_config(&store).is_err());

        let store = store.with(keys::LOG_FILE, "site.log");
        assert!(validate_config(&store).is_ok());
    }

    #[test]
    fn test_validate_missing_namespace() {
        let mut store = ConfigStore::new();
        store.insert(keys::ERROR_HANDLER, "a");
        store.insert(keys::ROUTE_HANDLER, "b");
        store.insert(keys::ROUTE_ERROR_HANDLER, "c");
        assert!(matches!(
            validate_config(&store),
            Err(ConfigError::MissingKey { .. })
        ));
    }
}
