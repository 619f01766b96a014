//! Recognised configuration keys and typed views over a [`ConfigStore`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::store::ConfigStore;

/// Configuration key names.
pub mod keys {
    /// Identifier of the application error handler.
    pub const ERROR_HANDLER: &str = "ERROR_HANDLER";
    /// Identifier of the route handler.
    pub const ROUTE_HANDLER: &str = "ROUTE_HANDLER";
    /// Identifier of the route error handler.
    pub const ROUTE_ERROR_HANDLER: &str = "ROUTE_ERROR_HANDLER";
    /// Root namespace for controller identifiers.
    pub const APP_NAMESPACE: &str = "APP_NAMESPACE";

    /// Log level (trace, debug, info, warn, error).
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log format (compact, full, pretty, json).
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Log output (stdout, stderr, file).
    pub const LOG_OUTPUT: &str = "LOG_OUTPUT";
    /// Log file path when `LOG_OUTPUT = "file"`.
    pub const LOG_FILE: &str = "LOG_FILE";
    /// Per-target level overrides.
    pub const LOG_FILTERS: &str = "LOG_FILTERS";
    /// Include thread IDs in log lines.
    pub const LOG_THREAD_IDS: &str = "LOG_THREAD_IDS";
    /// Log span close events with their timing.
    pub const LOG_SPAN_CLOSE: &str = "LOG_SPAN_CLOSE";
}

// =============================================================================
// Handler Selection
// =============================================================================

/// The collaborator identifiers selected by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// `ERROR_HANDLER`.
    pub error_handler: String,
    /// `ROUTE_HANDLER`.
    pub route_handler: String,
    /// `ROUTE_ERROR_HANDLER`.
    pub route_error_handler: String,
    /// `APP_NAMESPACE`.
    pub app_namespace: String,
}

impl HandlerConfig {
    /// Reads the handler keys from a store.
    pub fn from_store(store: &ConfigStore) -> ConfigResult<Self> {
        Ok(Self {
            error_handler: store.require_str(keys::ERROR_HANDLER)?.to_string(),
            route_handler: store.require_str(keys::ROUTE_HANDLER)?.to_string(),
            route_error_handler: store.require_str(keys::ROUTE_ERROR_HANDLER)?.to_string(),
            app_namespace: store.require_str(keys::APP_NAMESPACE)?.to_string(),
        })
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All accepted level names.
    pub const NAMES: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];

    /// Returns the level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::validation(format!(
                "Invalid log level: {s}. Valid values are: {:?}",
                Self::NAMES
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature; falls back to compact otherwise.
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    #[default]
    Stderr,
    File,
}

/// Logging settings read from the `LOG_*` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub file_path: Option<PathBuf>,
    /// Target → level directives, e.g. `frontier_core = "debug"`.
    pub filters: BTreeMap<String, LogLevel>,
    pub thread_ids: bool,
    pub span_close: bool,
}

impl LoggingConfig {
    /// Reads the logging keys from a store; absent keys keep their defaults.
    pub fn from_store(store: &ConfigStore) -> ConfigResult<Self> {
        let level = match store.get(keys::LOG_LEVEL) {
            None => LogLevel::default(),
            Some(value) => value
                .as_str()
                .ok_or_else(|| ConfigError::invalid_type(keys::LOG_LEVEL, "a string"))?
                .parse()?,
        };

        Ok(Self {
            level,
            format: store.get_as(keys::LOG_FORMAT)?.unwrap_or_default(),
            output: store.get_as(keys::LOG_OUTPUT)?.unwrap_or_default(),
            file_path: store.get_as(keys::LOG_FILE)?,
            filters: store.get_as(keys::LOG_FILTERS)?.unwrap_or_default(),
            thread_ids: store.get_as(keys::LOG_THREAD_IDS)?.unwrap_or_default(),
            span_close: store.get_as(keys::LOG_SPAN_CLOSE)?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handler_config_missing_key() {
        let store = ConfigStore::new()
            .with(keys::ERROR_HANDLER, "a")
            .with(keys::ROUTE_HANDLER, "b")
            .with(keys::APP_NAMESPACE, "App");

        let err = HandlerConfig::from_store(&store).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key } if key == keys::ROUTE_ERROR_HANDLER));
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::from_store(&ConfigStore::new()).unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.output, LogOutput::Stderr);
    }

    #[test]
    fn test_logging_config_values() {
        let store = ConfigStore::new()
            .with(keys::LOG_LEVEL, "debug")
            .with(keys::LOG_FORMAT, "pretty")
            .with(keys::LOG_OUTPUT, "file")
            .with(keys::LOG_FILE, "/var/log/site.log")
            .with(keys::LOG_FILTERS, json!({"frontier_core": "trace"}))
            .with(keys::LOG_THREAD_IDS, true)
            .with(keys::LOG_SPAN_CLOSE, true);

        let config = LoggingConfig::from_store(&store).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.output, LogOutput::File);
        assert_eq!(config.file_path, Some(PathBuf::from("/var/log/site.log")));
        assert_eq!(config.filters.get("frontier_core"), Some(&LogLevel::Trace));
        assert!(config.thread_ids);
        assert!(config.span_close);
    }

    #[test]
    fn test_invalid_log_level() {
        let store = ConfigStore::new().with(keys::LOG_LEVEL, "loud");
        assert!(LoggingConfig::from_store(&store).is_err());
    }

    #[test]
    fn test_log_level_accepts_only_the_five_names() {
        for name in LogLevel::NAMES {
            assert_eq!(name.parse::<LogLevel>().unwrap().as_str(), name);
        }
        for name in ["WARN", "Info", "warning", ""] {
            assert!(matches!(
                name.parse::<LogLevel>(),
                Err(ConfigError::ValidationError { .. })
            ));
        }
    }

    #[test]
    fn test_log_flags_must_be_booleans() {
        let store = ConfigStore::new().with(keys::LOG_SPAN_CLOSE, "yes");
        assert!(LoggingConfig::from_store(&store).is_err());
    }
}
