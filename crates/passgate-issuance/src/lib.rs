//! # passgate-issuance: Claim Coordination
//!
//! Wires the verifier, the state machines and the token registry into one
//! claim gate per drop.
//!
//! - `config.rs`: [`DropConfig`], loaded from YAML or JSON and validated.
//! - `gate.rs`: [`ClaimGate`], the coordinator. Claims, administrative
//!   operations, and queries.
//! - `treasury.rs`: collected payments and payouts.
//! - `event.rs`: the audit trail of accepted operations.
//! - `shared.rs`: [`SharedGate`], the locked handle services use.
//!
//! ## Example
//!
//! ```
//! use passgate_core::{Amount, Identity, ManualClock, Timestamp};
//! use passgate_crypto::{AllowListFormat, AllowListTree, ClaimTicket};
//! use passgate_issuance::{ClaimGate, DropConfig};
//! use passgate_registry::TokenNumbering;
//!
//! let members: Vec<Identity> = (1..=3).map(Identity::from_index).collect();
//! let tree = AllowListTree::from_identities(AllowListFormat::default(), &members).unwrap();
//! let start = Timestamp::parse("2026-03-01T00:00:00Z").unwrap();
//! let config = DropConfig {
//!     name: "demo".into(),
//!     root: tree.root(),
//!     max_supply: 3,
//!     base_uri: "ipfs://demo/".into(),
//!     price: Amount::ZERO,
//!     window_start: start,
//!     window_duration_secs: 3600,
//!     admin: Identity::from_index(100),
//!     beneficiary: Identity::from_index(100),
//!     allow_list: AllowListFormat::default(),
//!     numbering: TokenNumbering::OneBased,
//! };
//! let mut gate = ClaimGate::in_memory(&config, ManualClock::new(start)).unwrap();
//! let ticket = ClaimTicket::new(tree.proof(1).unwrap());
//! let token = gate.claim_allow_list(members[1], &ticket, Amount::ZERO).unwrap();
//! assert_eq!(gate.token_uri(token).unwrap(), "ipfs://demo/1");
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod gate;
pub mod shared;
pub mod treasury;

pub use config::{ConfigError, DropConfig};
pub use error::GateError;
pub use event::{GateEvent, GateEventKind};
pub use gate::{ClaimGate, DropStatus};
pub use shared::SharedGate;
pub use treasury::{Payout, Treasury};
