//! Identifier → constructor maps.
//!
//! Configuration names collaborators by string identifier. A [`FactoryMap`]
//! turns such an identifier into a fresh instance, or a
//! [`FrameworkError::UnknownIdentifier`] when nothing is registered under it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{FrameworkError, FrameworkResult};

/// A constructor for a boxed collaborator.
pub type Factory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

/// Maps identifiers to constructors for one collaborator capability.
pub struct FactoryMap<T: ?Sized> {
    kind: &'static str,
    factories: HashMap<String, Factory<T>>,
}

impl<T: ?Sized> FactoryMap<T> {
    /// Creates an empty map for the named capability.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            factories: HashMap::new(),
        }
    }

    /// Registers a constructor, replacing any previous one for the identifier.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        debug!(kind = self.kind, identifier = %identifier, "Registered factory");
        self.factories.insert(identifier, Arc::new(factory));
    }

    /// Constructs the collaborator registered under `identifier`.
    pub fn create(&self, identifier: &str) -> FrameworkResult<Box<T>> {
        self.factories
            .get(identifier)
            .map(|factory| factory())
            .ok_or_else(|| FrameworkError::unknown(self.kind, identifier))
    }

    /// Returns whether a constructor is registered under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Returns all registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.factories.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the number of registered constructors.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns the capability name used in error messages.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl<T: ?Sized> std::fmt::Debug for FactoryMap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryMap")
            .field("kind", &self.kind)
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    #[test]
    fn test_create_registered() {
        let mut map: FactoryMap<dyn Greeter> = FactoryMap::new("greeter");
        map.register("app.Hello", || Box::new(Hello) as Box<dyn Greeter>);

        assert!(map.contains("app.Hello"));
        assert_eq!(map.create("app.Hello").unwrap().greet(), "hello");
        assert_eq!(map.identifiers(), vec!["app.Hello".to_string()]);
    }

    #[test]
    fn test_unknown_identifier() {
        let map: FactoryMap<dyn Greeter> = FactoryMap::new("greeter");
        let err = map.create("app.Missing").err().unwrap();
        assert_eq!(err, FrameworkError::unknown("greeter", "app.Missing"));
    }
}
