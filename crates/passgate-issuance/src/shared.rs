//! # Shared Gate
//!
//! A cloneable handle for serving one gate from many threads or tasks.
//! Every operation runs under a single `parking_lot::Mutex`, so claims are
//! admitted strictly one at a time in lock-acquisition order and the supply
//! counter advances without gaps or duplicates. The lock is never held
//! across an `.await`.

use std::sync::Arc;

use parking_lot::Mutex;

use passgate_core::SystemClock;
use passgate_registry::InMemoryRegistry;

use crate::gate::ClaimGate;

/// Thread-safe handle to a [`ClaimGate`].
#[derive(Debug)]
pub struct SharedGate<R = InMemoryRegistry, C = SystemClock> {
    inner: Arc<Mutex<ClaimGate<R, C>>>,
}

impl<R, C> Clone for SharedGate<R, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, C> SharedGate<R, C> {
    /// Wrap a gate.
    pub fn new(gate: ClaimGate<R, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(gate)),
        }
    }

    /// Run a read-only closure under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&ClaimGate<R, C>) -> T) -> T {
        f(&self.inner.lock())
    }

    /// Run a mutating closure under the lock. The closure sees and changes
    /// the gate with no other operation interleaved.
    pub fn write<T>(&self, f: impl FnOnce(&mut ClaimGate<R, C>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
