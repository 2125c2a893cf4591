//! # Application State
//!
//! Shared state for the Axum application: one claim gate behind a lock.
//! The clock is boxed so the binary can run on wall-clock time while tests
//! drive a [`ManualClock`](passgate_core::ManualClock).

use std::sync::Arc;

use passgate_core::Clock;
use passgate_issuance::{ClaimGate, SharedGate};
use passgate_registry::InMemoryRegistry;

/// The clock type the service runs on.
pub type DynClock = Arc<dyn Clock>;

/// The gate type the service serves.
pub type ServedGate = ClaimGate<InMemoryRegistry, DynClock>;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: SharedGate<InMemoryRegistry, DynClock>,
}

impl AppState {
    /// Serve `gate`.
    pub fn new(gate: ServedGate) -> Self {
        Self {
            gate: SharedGate::new(gate),
        }
    }
}
