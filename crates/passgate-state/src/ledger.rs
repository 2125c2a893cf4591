//! # Claim Ledger
//!
//! Tracks which identities have claimed and how much of the supply is gone.
//!
//! Reservation is split in two so the coordinator can run the rest of a
//! claim (the registry mint) between the check and the write:
//!
//! 1. [`ClaimLedger::stage`] performs every check and returns a
//!    [`Reservation`] that mutably borrows the ledger. Nothing is written.
//! 2. [`Reservation::commit`] sets the claimed latch and bumps the counter
//!    together. Dropping the reservation instead leaves the ledger exactly
//!    as it was.
//!
//! The mutable borrow means no other ledger access can interleave between
//! the two steps.
//!
//! ## Security Invariant
//!
//! - `minted <= max_supply` at all times.
//! - An identity's claimed latch is set at most once and never cleared.
//! - The claimed check runs before the supply check, so a repeat claimant
//!   always sees `AlreadyClaimed`, even once supply is gone.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use passgate_core::Identity;

/// A reservation refused by the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The identity has already claimed.
    #[error("identity {0} has already claimed")]
    AlreadyClaimed(Identity),

    /// Every unit of supply has been issued.
    #[error("supply exhausted: all {max_supply} tokens issued")]
    SupplyExhausted {
        /// The supply cap.
        max_supply: u64,
    },
}

/// The claimed set plus the capped supply counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimLedger {
    max_supply: u64,
    minted: u64,
    claimed: HashSet<Identity>,
}

impl ClaimLedger {
    /// An empty ledger capped at `max_supply`.
    pub fn new(max_supply: u64) -> Self {
        Self {
            max_supply,
            minted: 0,
            claimed: HashSet::new(),
        }
    }

    /// The supply cap.
    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    /// Successful reservations so far.
    pub fn minted(&self) -> u64 {
        self.minted
    }

    /// Supply still available.
    pub fn remaining(&self) -> u64 {
        self.max_supply - self.minted
    }

    /// Whether `identity` has claimed.
    pub fn has_claimed(&self, identity: &Identity) -> bool {
        self.claimed.contains(identity)
    }

    /// Check `identity` can reserve, without writing anything.
    pub fn stage(&mut self, identity: Identity) -> Result<Reservation<'_>, LedgerError> {
        if self.claimed.contains(&identity) {
            return Err(LedgerError::AlreadyClaimed(identity));
        }
        if self.minted >= self.max_supply {
            return Err(LedgerError::SupplyExhausted {
                max_supply: self.max_supply,
            });
        }
        let serial = self.minted + 1;
        Ok(Reservation {
            ledger: self,
            identity,
            serial,
        })
    }

    /// Stage and commit in one step, returning the 1-based serial.
    pub fn try_reserve(&mut self, identity: Identity) -> Result<u64, LedgerError> {
        Ok(self.stage(identity)?.commit())
    }
}

/// A checked but not yet written reservation.
#[derive(Debug)]
#[must_use = "a reservation writes nothing unless committed"]
pub struct Reservation<'a> {
    ledger: &'a mut ClaimLedger,
    identity: Identity,
    serial: u64,
}

impl Reservation<'_> {
    /// The identity being reserved.
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// 1-based position this reservation takes in issuance order.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Write the reservation, returning its serial.
    pub fn commit(self) -> u64 {
        self.ledger.claimed.insert(self.identity);
        self.ledger.minted = self.serial;
        self.serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> Identity {
        Identity::from_index(n)
    }

    #[test]
    fn test_serials_are_sequential_from_one() {
        let mut ledger = ClaimLedger::new(3);
        assert_eq!(ledger.try_reserve(id(10)), Ok(1));
        assert_eq!(ledger.try_reserve(id(11)), Ok(2));
        assert_eq!(ledger.try_reserve(id(12)), Ok(3));
        assert_eq!(ledger.minted(), 3);
        assert_eq!(ledger.remaining(), 0);
    }

    #[test]
    fn test_repeat_claim_rejected() {
        let mut ledger = ClaimLedger::new(5);
        ledger.try_reserve(id(1)).unwrap();
        assert_eq!(ledger.try_reserve(id(1)), Err(LedgerError::AlreadyClaimed(id(1))));
        assert_eq!(ledger.minted(), 1);
    }

    #[test]
    fn test_already_claimed_reported_before_exhaustion() {
        let mut ledger = ClaimLedger::new(1);
        ledger.try_reserve(id(1)).unwrap();
        assert_eq!(ledger.try_reserve(id(1)), Err(LedgerError::AlreadyClaimed(id(1))));
        assert_eq!(
            ledger.try_reserve(id(2)),
            Err(LedgerError::SupplyExhausted { max_supply: 1 })
        );
    }

    #[test]
    fn test_dropped_reservation_writes_nothing() {
        let mut ledger = ClaimLedger::new(2);
        {
            let r = ledger.stage(id(7)).unwrap();
            assert_eq!(r.serial(), 1);
            assert_eq!(r.identity(), id(7));
        }
        assert!(!ledger.has_claimed(&id(7)));
        assert_eq!(ledger.minted(), 0);
        assert_eq!(ledger.try_reserve(id(7)), Ok(1));
        assert!(ledger.has_claimed(&id(7)));
    }

    #[test]
    fn test_zero_supply_ledger() {
        let mut ledger = ClaimLedger::new(0);
        assert_eq!(
            ledger.try_reserve(id(1)),
            Err(LedgerError::SupplyExhausted { max_supply: 0 })
        );
    }

    // -----------------------------------------------------------------------
    // Property-based tests
    // -----------------------------------------------------------------------

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cap_never_exceeded(
                max_supply in 0u64..20,
                claimants in proptest::collection::vec(0u64..40, 0..80),
            ) {
                let mut ledger = ClaimLedger::new(max_supply);
                let mut accepted = Vec::new();
                for n in claimants {
                    if let Ok(serial) = ledger.try_reserve(id(n)) {
                        accepted.push(serial);
                    }
                    prop_assert!(ledger.minted() <= max_supply);
                }
                let expected: Vec<u64> = (1..=accepted.len() as u64).collect();
                prop_assert_eq!(accepted, expected);
            }

            #[test]
            fn each_identity_claims_at_most_once(
                claimants in proptest::collection::vec(0u64..10, 1..50),
            ) {
                let mut ledger = ClaimLedger::new(100);
                let mut seen = HashSet::new();
                for n in claimants {
                    let result = ledger.try_reserve(id(n));
                    if seen.insert(n) {
                        prop_assert!(result.is_ok());
                    } else {
                        prop_assert_eq!(result, Err(LedgerError::AlreadyClaimed(id(n))));
                    }
                }
                prop_assert_eq!(ledger.minted(), seen.len() as u64);
            }
        }
    }
}
