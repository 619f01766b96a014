//! The fault boundary around initialization and dispatch.
//!
//! Everything the application runs after the boot check goes through
//! [`catch_faults`], so both returned errors and panics come out as a
//! [`Fault`] ready to be escalated.
//!
//! The process panic hook still runs before the unwind is caught, so with
//! the default hook a caught panic is also printed to stderr. Hosts that
//! want the escalated event to be the only report install their own hook
//! with [`std::panic::set_hook`] before calling `start`.

use std::panic::{AssertUnwindSafe, catch_unwind};

use frontier_core::{Fault, PanicFault};
use tracing::debug;

/// Runs `f`, turning a panic into a [`PanicFault`].
pub fn catch_faults<T, F>(f: F) -> Result<T, Fault>
where
    F: FnOnce() -> Result<T, Fault>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let fault = PanicFault::from_payload(payload);
            debug!(message = %fault.message, "Caught panic at fault boundary");
            Err(Box::new(fault))
        }
    }
}
