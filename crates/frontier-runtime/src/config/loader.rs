//! Configuration loader.
//!
//! Two sources make up the effective configuration:
//!
//! 1. **Framework defaults**: `config/defaults.toml`, shipped with this crate
//!    and embedded at build time
//! 2. **Application overrides**: either a programmatic [`ConfigStore`] or the
//!    application config file found in the config directory
//!
//! Each source is parsed into its own [`ConfigStore`], keeping the key order
//! of the document, and the overrides are merged over the defaults with
//! [`ConfigStore::merge`]. Merging is shallow: a key present in the
//! overrides replaces the default value whole.
//!
//! # Feature Flags
//!
//! - TOML (`config.toml`) is always supported
//! - `yaml-config`: also looks for `config.yaml` / `config.yml`
//!
//! # Example
//!
//! ```rust,ignore
//! use frontier_runtime::config::ConfigLoader;
//!
//! // Defaults merged with <app>/config/config.toml, if present
//! let config = ConfigLoader::new()
//!     .config_dir("/srv/site/config")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::store::ConfigStore;

/// The framework defaults.
pub const FRAMEWORK_DEFAULTS: &str = include_str!("../../config/defaults.toml");

/// Application config file names, in lookup order.
#[cfg(not(feature = "yaml-config"))]
pub const APP_CONFIG_FILES: &[&str] = &["config.toml"];
/// Application config file names, in lookup order.
#[cfg(feature = "yaml-config")]
pub const APP_CONFIG_FILES: &[&str] = &["config.toml", "config.yaml", "config.yml"];

/// Configuration loader: framework defaults plus one application source.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Directory searched for the application config file.
    config_dir: Option<PathBuf>,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
    /// Programmatic overrides (replace the file).
    overrides: Option<ConfigStore>,
}

impl ConfigLoader {
    /// Creates a loader that only yields the framework defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory searched for the application config file.
    pub fn config_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific application config file; it must exist.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Uses `overrides` instead of reading an application config file.
    pub fn overrides(mut self, overrides: ConfigStore) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Loads the defaults and merges the application overrides over them.
    pub fn load(self) -> ConfigResult<ConfigStore> {
        let mut config = load_framework_defaults()?;
        trace!(keys = config.len(), "Loaded framework defaults");

        if let Some(overrides) = self.overrides {
            debug!(keys = overrides.len(), "Merging programmatic configuration");
            config.merge(overrides);
        } else if let Some(path) = self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            config.merge(load_file(&path)?);
        } else if let Some(path) = self.config_dir.as_deref().and_then(find_app_config) {
            config.merge(load_file(&path)?);
        } else {
            debug!("No application configuration file found, using defaults");
        }

        Ok(config)
    }
}

/// Parses the framework defaults.
pub fn load_framework_defaults() -> ConfigResult<ConfigStore> {
    parse_toml(FRAMEWORK_DEFAULTS, "framework defaults")
}

/// Parses a single config file, dispatching on its extension.
///
/// Only extensions enabled via feature flags are accepted.
pub fn load_file(path: &Path) -> ConfigResult<ConfigStore> {
    info!(path = %path.display(), "Loading configuration file");

    let source = path.display().to_string();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "toml" => parse_toml(&read_file(path)?, &source),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => parse_yaml(&read_file(path)?, &source),
        _ => Err(ConfigError::ParseError(format!(
            "Unsupported or disabled configuration file format: .{ext}"
        ))),
    }
}

/// Returns the first application config file present in `dir`.
fn find_app_config(dir: &Path) -> Option<PathBuf> {
    APP_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("{}: {e}", path.display())),
    })
}

/// Parses TOML text into a store in document order.
fn parse_toml(content: &str, source: &str) -> ConfigResult<ConfigStore> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{source}: {e}")))
}

/// Parses YAML text into a store in document order.
#[cfg(feature = "yaml-config")]
fn parse_yaml(content: &str, source: &str) -> ConfigResult<ConfigStore> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{source}: {e}")))
}

// =============================================================================
// Tests
// =============================================================================
