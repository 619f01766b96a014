//! Process preconditions and request inputs.
//!
//! The front controller is started once per request with CGI-style
//! variables describing where the application lives and what was asked for.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `APP_PATH` | application base directory | required |
//! | `APP_CONFIG_PATH` | directory holding `config.toml` | `<APP_PATH>/config` |
//! | `REQUEST_URI` | request target | `/` |
//! | `SCRIPT_NAME` | mount path of the entry script | unset |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BootError, BootResult};

/// Base application path variable.
pub const APP_PATH: &str = "APP_PATH";
/// Config directory variable.
pub const APP_CONFIG_PATH: &str = "APP_CONFIG_PATH";
/// Request target variable.
pub const REQUEST_URI: &str = "REQUEST_URI";
/// Entry script path variable.
pub const SCRIPT_NAME: &str = "SCRIPT_NAME";

/// Config directory name under the application path.
pub const CONFIG_DIR: &str = "config";

/// Request target used when none was provided.
pub const DEFAULT_REQUEST_PATH: &str = "/";

/// A snapshot of the variables the application reads at startup.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    app_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    request_uri: Option<String>,
    script_name: Option<String>,
}

impl Environment {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    pub fn from_process() -> Self {
        let env = Self {
            app_path: var_os(APP_PATH).map(PathBuf::from),
            config_path: var_os(APP_CONFIG_PATH).map(PathBuf::from),
            request_uri: var(REQUEST_URI),
            script_name: var(SCRIPT_NAME),
        };
        debug!(
            app_path = ?env.app_path,
            request_uri = ?env.request_uri,
            "Captured process environment"
        );
        env
    }

    /// Sets the application base directory.
    pub fn with_app_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.app_path = non_empty_path(path.into());
        self
    }

    /// Sets the config directory.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = non_empty_path(path.into());
        self
    }

    /// Sets the request target.
    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = non_empty(uri.into());
        self
    }

    /// Sets the entry script path.
    pub fn with_script_name(mut self, name: impl Into<String>) -> Self {
        self.script_name = non_empty(name.into());
        self
    }

    /// Returns the application base directory, if set.
    pub fn app_path(&self) -> Option<&Path> {
        self.app_path.as_deref()
    }

    /// Returns the application base directory.
    pub fn require_app_path(&self) -> BootResult<&Path> {
        self.app_path().ok_or(BootError::MissingAppPath)
    }

    /// Returns the directory searched for the application config file.
    pub fn config_dir(&self) -> BootResult<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(self.require_app_path()?.join(CONFIG_DIR)),
        }
    }

    /// Returns the request target, `/` if none was given.
    pub fn request_path(&self) -> &str {
        self.request_uri.as_deref().unwrap_or(DEFAULT_REQUEST_PATH)
    }

    /// Returns the URL prefix under which the application is mounted.
    ///
    /// This is `SCRIPT_NAME` up to its last `/`, or empty when that slash is
    /// the first character or missing.
    pub fn url_context(&self) -> &str {
        let Some(script) = self.script_name.as_deref() else {
            return "";
        };
        match script.rfind('/') {
            Some(0) | None => "",
            Some(index) => &script[..index],
        }
    }

    /// Returns the request inputs for one dispatch.
    pub fn request(&self) -> RequestContext {
        RequestContext {
            path: self.request_path().to_string(),
            url_context: self.url_context().to_string(),
        }
    }
}

/// The request inputs for one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Request target, including any query string.
    pub path: String,
    /// URL prefix for absolute links.
    pub url_context: String,
}

fn var_os(key: &str) -> Option<OsString> {
    std::env::var_os(key).filter(|value| !value.is_empty())
}

fn var(key: &str) -> Option<String> {
    var_os(key).map(|value| value.to_string_lossy().into_owned())
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn non_empty_path(path: PathBuf) -> Option<PathBuf> {
    (!path.as_os_str().is_empty()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_missing_app_path() {
        let env = Environment::new();
        assert_eq!(env.require_app_path(), Err(BootError::MissingAppPath));
        assert_eq!(env.config_dir(), Err(BootError::MissingAppPath));

        let env = Environment::new().with_app_path("");
        assert_eq!(env.require_app_path(), Err(BootError::MissingAppPath));
    }

    #[test]
    fn test_config_dir_defaults_under_app_path() {
        let env = Environment::new().with_app_path("/srv/site");
        assert_eq!(env.config_dir().unwrap(), PathBuf::from("/srv/site/config"));

        let env = env.with_config_path("/etc/site");
        assert_eq!(env.config_dir().unwrap(), PathBuf::from("/etc/site"));
    }

    #[test]
    fn test_request_path_default() {
        assert_eq!(Environment::new().request_path(), "/");
        assert_eq!(
            Environment::new()
                .with_request_uri("/blog/show?id=4")
                .request_path(),
            "/blog/show?id=4"
        );
    }

    #[test]
    fn test_url_context() {
        let context = |script: &str| {
            Environment::new()
                .with_script_name(script)
                .url_context()
                .to_string()
        };

        assert_eq!(context("/site/index.php"), "/site");
        assert_eq!(context("/a/b/front"), "/a/b");
        assert_eq!(context("/index.php"), "");
        assert_eq!(context("index.php"), "");
        assert_eq!(Environment::new().url_context(), "");
    }

    #[test]
    fn test_from_process() {
        Jail::expect_with(|jail| {
            jail.set_env(APP_PATH, "/srv/site");
            jail.set_env(REQUEST_URI, "/news/latest");
            jail.set_env(SCRIPT_NAME, "/portal/index");
            jail.set_env(APP_CONFIG_PATH, "");

            let env = Environment::from_process();
            assert_eq!(env.app_path(), Some(Path::new("/srv/site")));
            assert_eq!(env.config_dir().unwrap(), PathBuf::from("/srv/site/config"));
            assert_eq!(
                env.request(),
                RequestContext {
                    path: "/news/latest".to_string(),
                    url_context: "/portal".to_string(),
                }
            );
            Ok(())
        });
    }
}
