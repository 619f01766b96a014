//! Ordered key → value configuration store.
//!
//! A [`ConfigStore`] is built from the framework defaults and the
//! application overrides. [`merge`] combines the two once at startup; the
//! result stays read-only for the rest of the request.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ConfigError, ConfigResult};

/// An ordered mapping of configuration keys to values.
///
/// Keys keep the order in which they were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    values: Map<String, Value>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Sets a key (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets or replaces a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the raw value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns a string value, or `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Returns a string value, failing if absent or not a string.
    pub fn require_str(&self, key: &str) -> ConfigResult<&str> {
        match self.values.get(key) {
            None | Some(Value::Null) => Err(ConfigError::missing_key(key)),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(ConfigError::invalid_type(key, "a string")),
        }
    }

    /// Deserializes a value into `T`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<Option<T>> {
        self.values
            .get(key)
            .map(|value| {
                T::deserialize(value).map_err(|e| {
                    ConfigError::validation(format!("Failed to read {key}: {e}"))
                })
            })
            .transpose()
    }

    /// Returns whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merges `overrides` into this store.
    ///
    /// Keys present in `overrides` replace existing values in place; new
    /// keys are appended in the order they appear in `overrides`.
    pub fn merge(&mut self, overrides: ConfigStore) {
        for (key, value) in overrides.values {
            self.values.insert(key, value);
        }
    }
}

impl From<Map<String, Value>> for ConfigStore {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

/// Returns `base` with `overrides` merged over it.
///
/// Every key of either source is present in the result; on collision the
/// value from `overrides` wins.
pub fn merge(mut base: ConfigStore, overrides: ConfigStore) -> ConfigStore {
    base.merge(overrides);
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overlapping_keys() {
        let base: ConfigStore = [("A", 1), ("B", 2)].into_iter().collect();
        let overrides: ConfigStore = [("B", 3), ("C", 4)].into_iter().collect();

        let merged = merge(base, overrides);

        let expected: ConfigStore = [("A", 1), ("B", 3), ("C", 4)].into_iter().collect();
        assert_eq!(merged, expected);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_merge_disjoint_and_empty() {
        let base: ConfigStore = [("A", 1)].into_iter().collect();
        let merged = merge(base.clone(), ConfigStore::new());
        assert_eq!(merged, base);

        let merged = merge(ConfigStore::new(), base.clone());
        assert_eq!(merged, base);

        let merged = merge(base, [("Z", 9)].into_iter().collect());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("Z"), Some(&json!(9)));
    }

    #[test]
    fn test_merge_replaces_structured_values_whole() {
        let base = ConfigStore::new().with("LOG_FILTERS", json!({"a": "debug", "b": "info"}));
        let overrides = ConfigStore::new().with("LOG_FILTERS", json!({"c": "trace"}));

        let merged = merge(base, overrides);
        assert_eq!(merged.get("LOG_FILTERS"), Some(&json!({"c": "trace"})));
    }

    #[test]
    fn test_typed_accessors() {
        let store = ConfigStore::new()
            .with("APP_NAMESPACE", "App")
            .with("RETRIES", 3)
            .with("NOTHING", Value::Null);

        assert_eq!(store.get_str("APP_NAMESPACE"), Some("App"));
        assert_eq!(store.require_str("APP_NAMESPACE").unwrap(), "App");
        assert!(matches!(
            store.require_str("RETRIES"),
            Err(ConfigError::InvalidType { .. })
        ));
        assert!(matches!(
            store.require_str("NOTHING"),
            Err(ConfigError::MissingKey { .. })
        ));
        assert_eq!(store.get_as::<u32>("RETRIES").unwrap(), Some(3));
        assert_eq!(store.get_as::<u32>("ABSENT").unwrap(), None);
        assert!(store.get_as::<u32>("APP_NAMESPACE").is_err());
    }
}
