//! Event registry for the Frontier framework.
//!
//! This module provides the [`EventRegistry`], which maps an event kind to the
//! ordered list of listeners registered for it.
//!
//! # Dispatch Rules
//!
//! When an event is dispatched:
//!
//! 1. Listeners are looked up by the event's concrete type
//! 2. Every listener of that kind runs, in registration order
//! 3. All listeners receive the same `&mut` event, so a field rewritten by
//!    one listener is visible to the ones after it
//!
//! Dispatching a kind without listeners does nothing.
//!
//! ```rust,ignore
//! use frontier_core::{EventRegistry, RouteErrorEvent};
//!
//! let mut registry = EventRegistry::new();
//! registry.register::<RouteErrorEvent, _>(|event: &mut RouteErrorEvent| {
//!     event.http_error_code = 410;
//! });
//!
//! let mut event = RouteErrorEvent::not_found("gone");
//! registry.dispatch(&mut event);
//! assert_eq!(event.http_error_code, 410);
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use tracing::{Level, debug, span, trace};

use crate::foundation::event::Event;

/// A capability that handles one kind of event.
///
/// Any `Fn(&mut E)` closure is a listener.
pub trait Listener<E: Event>: Send + Sync + 'static {
    /// Handles the event.
    fn handle(&self, event: &mut E);
}

impl<E, F> Listener<E> for F
where
    E: Event,
    F: Fn(&mut E) + Send + Sync + 'static,
{
    fn handle(&self, event: &mut E) {
        self(event)
    }
}

type ErasedListener = Box<dyn Fn(&mut dyn Any) + Send + Sync>;

struct ListenerList {
    kind: &'static str,
    listeners: Vec<ErasedListener>,
}

/// Ordered, kind-keyed listener dispatch.
///
/// Listeners are never removed; the registry only grows during startup and
/// is read-only once dispatching begins.
#[derive(Default)]
pub struct EventRegistry {
    lists: HashMap<TypeId, ListenerList>,
}

impl EventRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            lists: HashMap::new(),
        }
    }

    /// Appends a listener to the list for event kind `E`.
    pub fn register<E, L>(&mut self, listener: L)
    where
        E: Event,
        L: Listener<E>,
    {
        let erased: ErasedListener = Box::new(move |event: &mut dyn Any| {
            if let Some(event) = event.downcast_mut::<E>() {
                listener.handle(event);
            }
        });

        let list = self
            .lists
            .entry(TypeId::of::<E>())
            .or_insert_with(|| ListenerList {
                kind: type_name::<E>(),
                listeners: Vec::new(),
            });
        list.listeners.push(erased);

        debug!(
            kind = list.kind,
            position = list.listeners.len(),
            "Registered listener"
        );
    }

    /// Dispatches an event to every listener of its kind, in registration
    /// order, on the calling thread.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch<E: Event>(&self, event: &mut E) -> usize {
        let span = span!(Level::DEBUG, "dispatch", event_name = %event.event_name());
        let _enter = span.enter();

        let Some(list) = self.lists.get(&TypeId::of::<E>()) else {
            trace!("No listeners registered, event dropped");
            return 0;
        };

        for listener in &list.listeners {
            listener(&mut *event);
        }

        debug!(listeners = list.listeners.len(), "Event dispatched");
        list.listeners.len()
    }

    /// Returns the number of listeners registered for kind `E`.
    pub fn listener_count<E: Event>(&self) -> usize {
        self.lists
            .get(&TypeId::of::<E>())
            .map_or(0, |list| list.listeners.len())
    }

    /// Returns whether any listener is registered for kind `E`.
    pub fn has_listeners<E: Event>(&self) -> bool {
        self.listener_count::<E>() > 0
    }

    /// Returns whether no listener of any kind is registered.
    pub fn is_empty(&self) -> bool {
        self.lists.values().all(|list| list.listeners.is_empty())
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for list in self.lists.values() {
            map.entry(&list.kind, &list.listeners.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::event::{ApplicationErrorEvent, RouteErrorEvent};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_no_listeners() {
        let registry = EventRegistry::new();
        let mut event = RouteErrorEvent::not_found("nothing");
        assert_eq!(registry.dispatch(&mut event), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = EventRegistry::new();

        let first = Arc::clone(&log);
        registry.register::<ApplicationErrorEvent, _>(move |_: &mut ApplicationErrorEvent| {
            first.lock().unwrap().push("L1 start");
            first.lock().unwrap().push("L1 end");
        });
        let second = Arc::clone(&log);
        registry.register::<ApplicationErrorEvent, _>(move |_: &mut ApplicationErrorEvent| {
            second.lock().unwrap().push("L2 start");
            second.lock().unwrap().push("L2 end");
        });

        let mut event = ApplicationErrorEvent::custom(1, "failure");
        assert_eq!(registry.dispatch(&mut event), 2);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["L1 start", "L1 end", "L2 start", "L2 end"]
        );
    }

    #[test]
    fn test_kinds_do_not_share_listeners() {
        let hits = Arc::new(Mutex::new(0));
        let mut registry = EventRegistry::new();

        let counter = Arc::clone(&hits);
        registry.register::<RouteErrorEvent, _>(move |_: &mut RouteErrorEvent| {
            *counter.lock().unwrap() += 1;
        });

        let mut app_event = ApplicationErrorEvent::custom(2, "not routed");
        assert_eq!(registry.dispatch(&mut app_event), 0);
        assert_eq!(*hits.lock().unwrap(), 0);

        assert_eq!(registry.listener_count::<RouteErrorEvent>(), 1);
        assert!(!registry.has_listeners::<ApplicationErrorEvent>());
    }

    #[test]
    fn test_mutation_visible_to_later_listeners() {
        let seen = Arc::new(Mutex::new(None));
        let mut registry = EventRegistry::new();

        registry.register::<RouteErrorEvent, _>(|event: &mut RouteErrorEvent| {
            event.http_error_code = 410;
        });
        let observed = Arc::clone(&seen);
        registry.register::<RouteErrorEvent, _>(move |event: &mut RouteErrorEvent| {
            *observed.lock().unwrap() = Some(event.http_error_code);
        });

        let mut event = RouteErrorEvent::not_found("gone");
        registry.dispatch(&mut event);

        assert_eq!(*seen.lock().unwrap(), Some(410));
        assert_eq!(event.http_error_code, 410);
    }
}
