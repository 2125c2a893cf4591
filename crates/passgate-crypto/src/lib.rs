//! # passgate-crypto: Allow-List Cryptography
//!
//! Provides the cryptographic building blocks for Passgate:
//!
//! - **Leaf construction** (`leaf.rs`): the versioned rule that turns an
//!   identity (and, for indexed lists, its position) into a leaf digest.
//! - **Proof verification** (`merkle.rs`): recomputes a root from a leaf and
//!   an ordered sibling path using the sorted-pair rule, then compares it to
//!   the trusted root in constant time.
//! - **Fixture trees** (`tree.rs`): builds sorted-pair trees and proofs the
//!   same way off-system allow-list tooling does. The issuance path never
//!   builds trees; it only verifies.
//!
//! ## Crate Policy
//!
//! - Depends only on `passgate-core` internally.
//! - No mocking of hash functions in tests: all tests use real Keccak-256
//!   and SHA-256.
//! - Verification never short-circuits on intermediate values.

pub mod error;
pub mod leaf;
pub mod merkle;
pub mod tree;

pub use error::CryptoError;
pub use leaf::{AllowListFormat, LeafEncoding};
pub use merkle::{compute_root, node_hash, verify_proof, AllowList, ClaimTicket, ProofPath, MAX_PROOF_DEPTH};
pub use tree::AllowListTree;
