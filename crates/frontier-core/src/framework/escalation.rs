//! One funnel for the two failure channels.
//!
//! A missing controller and an uncaught fault differ only in payload and
//! origin. Both are expressed as an [`Escalation`] and delivered through the
//! same [`EventRegistry`].

use tracing::{debug, warn};

use crate::error::Fault;
use crate::foundation::event::{ApplicationErrorEvent, RouteErrorEvent};
use crate::framework::registry::EventRegistry;

/// A failure on its way to the registered handlers.
#[derive(Debug)]
pub enum Escalation {
    /// The route resolved to a controller that does not exist.
    RouteNotFound(RouteErrorEvent),
    /// A fault escaped initialization, resolution or invocation.
    Fault(ApplicationErrorEvent),
}

impl Escalation {
    /// Dispatches the event to every listener of its kind.
    ///
    /// Returns the delivered event so callers can read fields that listeners
    /// may have rewritten.
    pub fn escalate(self, registry: &EventRegistry) -> Self {
        match self {
            Self::RouteNotFound(mut event) => {
                let delivered = registry.dispatch(&mut event);
                debug!(
                    code = event.http_error_code,
                    listeners = delivered,
                    "Route error escalated"
                );
                Self::RouteNotFound(event)
            }
            Self::Fault(mut event) => {
                let delivered = registry.dispatch(&mut event);
                if delivered == 0 {
                    warn!(error = %event.message(), "Application error had no listener");
                }
                Self::Fault(event)
            }
        }
    }

    /// Returns the HTTP status carried by the event.
    pub fn http_error_code(&self) -> u16 {
        match self {
            Self::RouteNotFound(event) => event.http_error_code,
            Self::Fault(event) => event.http_error_code,
        }
    }
}

impl From<Fault> for Escalation {
    fn from(fault: Fault) -> Self {
        Self::Fault(ApplicationErrorEvent::new(fault))
    }
}

impl From<RouteErrorEvent> for Escalation {
    fn from(event: RouteErrorEvent) -> Self {
        Self::RouteNotFound(event)
    }
}

impl From<ApplicationErrorEvent> for Escalation {
    fn from(event: ApplicationErrorEvent) -> Self {
        Self::Fault(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Signal;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fault_and_route_use_their_own_channel() {
        let faults = Arc::new(AtomicUsize::new(0));
        let routes = Arc::new(AtomicUsize::new(0));
        let mut registry = EventRegistry::new();

        let f = Arc::clone(&faults);
        registry.register::<ApplicationErrorEvent, _>(move |_: &mut ApplicationErrorEvent| {
            f.fetch_add(1, Ordering::SeqCst);
        });
        let r = Arc::clone(&routes);
        registry.register::<RouteErrorEvent, _>(move |_: &mut RouteErrorEvent| {
            r.fetch_add(1, Ordering::SeqCst);
        });

        let fault: Fault = Box::new(Signal::new(2, "warning"));
        Escalation::from(fault).escalate(&registry);
        Escalation::from(RouteErrorEvent::not_found("x")).escalate(&registry);

        assert_eq!(faults.load(Ordering::SeqCst), 1);
        assert_eq!(routes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_escalate_returns_rewritten_event() {
        let mut registry = EventRegistry::new();
        registry.register::<RouteErrorEvent, _>(|event: &mut RouteErrorEvent| {
            event.http_error_code = 451;
        });

        let delivered = Escalation::from(RouteErrorEvent::not_found("blocked")).escalate(&registry);
        assert!(matches!(delivered, Escalation::RouteNotFound(_)));
        assert_eq!(delivered.http_error_code(), 451);
    }
}
