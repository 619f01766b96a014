//! Resolved routing decisions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The routing decision derived from a request path.
///
/// `controller_name` uses dotted hierarchical notation (`admin.users`); each
/// segment maps to one level of the controller namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    controller_name: String,
    action_name: String,
    #[serde(default)]
    parameters: BTreeMap<String, String>,
}

impl RouteInfo {
    /// Creates a route without parameters.
    pub fn new(controller_name: impl Into<String>, action_name: impl Into<String>) -> Self {
        Self {
            controller_name: controller_name.into(),
            action_name: action_name.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a parameter (builder pattern).
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Adds several parameters (builder pattern).
    pub fn with_parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns the dotted controller name.
    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    /// Returns the action name.
    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    /// Returns all parameters.
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Returns a single parameter.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

impl std::fmt::Display for RouteInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.controller_name, self.action_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_accessors() {
        let route = RouteInfo::new("admin.users", "edit")
            .with_parameter("id", "42")
            .with_parameters([("tab", "profile")]);

        assert_eq!(route.controller_name(), "admin.users");
        assert_eq!(route.action_name(), "edit");
        assert_eq!(route.parameter("id"), Some("42"));
        assert_eq!(route.parameter("tab"), Some("profile"));
        assert_eq!(route.parameter("missing"), None);
        assert_eq!(route.to_string(), "admin.users/edit");
    }
}
