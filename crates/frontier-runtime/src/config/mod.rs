//! Configuration module for the Frontier runtime.
//!
//! This module provides the ordered [`ConfigStore`], figment-based loading of
//! the framework defaults and application overrides, typed views over the
//! recognised keys, and validation of the effective configuration.

pub mod error;
pub mod loader;
pub mod schema;
pub mod store;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, FRAMEWORK_DEFAULTS, load_file, load_framework_defaults};
pub use schema::{HandlerConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, keys};
pub use store::{ConfigStore, merge};
pub use validation::validate_config;
