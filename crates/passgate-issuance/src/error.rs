//! # Gate Errors
//!
//! Every way a claim or administrative call can be refused. Each variant
//! has a stable [`GateError::code`] that surfaces unchanged over HTTP and
//! in logs; the display text may change, the code may not.

use thiserror::Error;

use passgate_core::Amount;
use passgate_registry::RegistryError;
use passgate_state::{AccessError, GuardError, LedgerError, PhaseError};

/// A refused gate operation. No state changes when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The caller lacks the required role.
    #[error(transparent)]
    Unauthorized(#[from] AccessError),

    /// Pause flag precondition failed.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// The phase does not allow this call.
    #[error(transparent)]
    Phase(#[from] PhaseError),

    /// Payment differs from the configured price.
    #[error("wrong payment amount: expected {expected}, received {received}")]
    WrongPaymentAmount {
        /// The configured price.
        expected: Amount,
        /// What was sent.
        received: Amount,
    },

    /// The allow-list proof does not verify for this caller.
    #[error("invalid allow-list proof")]
    InvalidProof,

    /// Claimed-latch or supply check failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The collected balance would overflow.
    #[error("collected balance would overflow")]
    BalanceOverflow,

    /// The token registry refused the operation.
    #[error("token registry: {0}")]
    Registry(#[from] RegistryError),
}

impl GateError {
    /// Stable machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Guard(GuardError::Paused) => "PAUSED",
            Self::Guard(GuardError::NotPaused) => "NOT_PAUSED",
            Self::Phase(PhaseError::WindowNotStarted) => "WINDOW_NOT_STARTED",
            Self::Phase(PhaseError::WindowAlreadyEnded) => "WINDOW_ALREADY_ENDED",
            Self::Phase(PhaseError::OpenMintNotActive) => "OPEN_MINT_NOT_ACTIVE",
            Self::Phase(PhaseError::MintingEnded) => "MINTING_ENDED",
            Self::Phase(PhaseError::TransitionTooEarly { .. }) => "PHASE_TRANSITION_TOO_EARLY",
            Self::Phase(PhaseError::InvalidWindow(_)) => "INVALID_WINDOW",
            Self::WrongPaymentAmount { .. } => "WRONG_PAYMENT_AMOUNT",
            Self::InvalidProof => "INVALID_PROOF",
            Self::Ledger(LedgerError::AlreadyClaimed(_)) => "ALREADY_CLAIMED",
            Self::Ledger(LedgerError::SupplyExhausted { .. }) => "SUPPLY_EXHAUSTED",
            Self::BalanceOverflow => "BALANCE_OVERFLOW",
            Self::Registry(RegistryError::NonexistentToken(_)) => "NONEXISTENT_TOKEN",
            Self::Registry(
                RegistryError::IndexOutOfBounds { .. } | RegistryError::OwnerIndexOutOfBounds { .. },
            ) => "INDEX_OUT_OF_BOUNDS",
            Self::Registry(RegistryError::IdSpaceExhausted) => "ID_SPACE_EXHAUSTED",
        }
    }
}
