//! # Clocks
//!
//! Phase derivation reads wall-clock time. Reading it through [`Clock`]
//! keeps the phase state machine a pure function of `(now, flags, window)`
//! and lets tests place `now` anywhere without waiting.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::temporal::Timestamp;

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// The current UTC time, truncated to seconds.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A manually driven clock. Clones share the same instant, so a test can
/// hand one clone to a gate and keep another to move time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<Timestamp>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, to: Timestamp) {
        *self.now.write() = to;
    }

    /// Move forward (or backward, for negative `secs`). Out-of-range moves
    /// leave the clock unchanged and return `false`.
    pub fn advance(&self, secs: i64) -> bool {
        let mut guard = self.now.write();
        match guard.checked_add_secs(secs) {
            Some(next) => {
                *guard = next;
                true
            }
            None => false,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let start = Timestamp::parse("2026-03-01T00:00:00Z").unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();
        assert!(handle.advance(3600));
        assert_eq!(clock.now().to_iso8601(), "2026-03-01T01:00:00Z");
    }

    #[test]
    fn manual_clock_set() {
        let clock = ManualClock::new(Timestamp::parse("2026-03-01T00:00:00Z").unwrap());
        let target = Timestamp::parse("2027-01-01T00:00:00Z").unwrap();
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn arc_dyn_clock_delegates() {
        let start = Timestamp::parse("2026-03-01T00:00:00Z").unwrap();
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(start));
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn system_clock_is_recent() {
        let floor = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        assert!(SystemClock.now() > floor);
    }
}
