//! # passgate-state: Issuance State Machines
//!
//! The mutable state a drop carries between claims, each piece owned by a
//! small state machine that only accepts moves consistent with its rules.
//!
//! ## State Machines
//!
//! - **Phase** (`phase.rs`): the issuance phase is derived on every read
//!   from `(now, stage, window)`. Only the stage is stored, and it only
//!   moves forward: `SCHEDULED → OPEN_MINT_ACTIVE → ENDED`, with `ENDED`
//!   absorbing.
//!
//! - **Ledger** (`ledger.rs`): the one-way claimed latch per identity plus
//!   the capped supply counter. Reservation is stage-then-commit so a caller
//!   can abort after staging with nothing written.
//!
//! - **Guard** (`guard.rs`): the pause flag and the role check consulted
//!   before every privileged operation.
//!
//! ## Design
//!
//! None of these types lock or log. The issuance coordinator owns all of
//! them in one aggregate, serializes access, and records what happened.

pub mod guard;
pub mod ledger;
pub mod phase;

// ─── Phase re-exports ───────────────────────────────────────────────

pub use phase::{
    ClaimPath, MintPhase, MintStage, MintWindow, PhaseController, PhaseError, StageTransitionRecord,
};

// ─── Ledger re-exports ──────────────────────────────────────────────

pub use ledger::{ClaimLedger, LedgerError, Reservation};

// ─── Guard re-exports ───────────────────────────────────────────────

pub use guard::{AccessControl, AccessError, GuardError, PauseGuard, Role};
