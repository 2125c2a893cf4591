//! Audit records of accepted gate operations.

use serde::{Deserialize, Serialize};

use passgate_core::{Amount, Identity, Timestamp, TokenId};
use passgate_state::ClaimPath;

/// Something the gate accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateEventKind {
    /// A token was issued.
    Claimed {
        /// Recipient.
        identity: Identity,
        /// The token issued.
        token_id: TokenId,
        /// Which path admitted the claim.
        path: ClaimPath,
        /// Payment received.
        paid: Amount,
    },
    /// Open minting was activated.
    OpenMintActivated,
    /// All minting was ended.
    MintingEnded,
    /// The drop was paused.
    Paused,
    /// The drop was unpaused.
    Unpaused,
    /// The balance was paid to the beneficiary.
    Withdrawn {
        /// Recipient.
        to: Identity,
        /// Amount paid.
        amount: Amount,
    },
    /// The balance was swept to the administrator while paused.
    FundsRecovered {
        /// Recipient.
        to: Identity,
        /// Amount swept.
        amount: Amount,
    },
    /// The metadata prefix changed.
    BaseUriUpdated {
        /// New prefix.
        base_uri: String,
    },
    /// The administrator role changed hands.
    AdminTransferred {
        /// Previous administrator.
        from: Identity,
        /// New administrator.
        to: Identity,
    },
}

/// An accepted operation with who triggered it and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateEvent {
    /// When it was accepted.
    pub timestamp: Timestamp,
    /// Who called.
    pub actor: Identity,
    /// What happened.
    #[serde(flatten)]
    pub kind: GateEventKind,
}
