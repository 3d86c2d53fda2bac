//! Inert destination for development and tests without hardware.

use tracing::{info, trace};

use crate::{DispatchOutcome, PrintTarget};

/// A destination that accepts and discards every payload and always
/// reports ready. Touches neither the filesystem nor the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDestination;

impl NullDestination {
    /// Create a null destination.
    pub fn new() -> Self {
        Self
    }
}

impl PrintTarget for NullDestination {
    fn status(&self) -> String {
        "Dummy printer ready".to_string()
    }

    fn transmit(&self, payload: &str) -> DispatchOutcome {
        // Only the length at default verbosity: label content can carry
        // personal data and belongs in trace-level logs alone.
        info!(len = payload.len(), "dummy printer discarded payload");
        trace!(payload, "discarded payload content");
        DispatchOutcome::ACCEPTED
    }
}
