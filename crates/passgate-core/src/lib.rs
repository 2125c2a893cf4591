//! # passgate-core: Foundational Types for Passgate
//!
//! This crate is the bedrock of the Passgate workspace. It defines the
//! primitive types every other crate agrees on: digests, identities, token
//! numbers, amounts and time. Every other crate in the workspace depends on
//! `passgate-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Identity`, `TokenId`,
//!    `Digest`, `Amount`: no bare byte arrays or integers cross crate
//!    boundaries.
//!
//! 2. **One hash entry point.** All digest computation flows through
//!    [`DigestAlgorithm::digest()`], so the algorithm that built an
//!    allow-list and the algorithm that verifies it are selected from the
//!    same enum.
//!
//! 3. **Exact amounts.** `Amount` is an integer count of the smallest unit.
//!    Text forms are decimal strings; floats are never accepted.
//!
//! 4. **UTC-only timestamps, injected clocks.** Time is read through the
//!    [`Clock`] trait so state machines stay pure functions of their inputs.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `passgate-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod amount;
pub mod clock;
pub mod digest;
pub mod error;
mod hex;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::Amount;
pub use clock::{Clock, ManualClock, SystemClock};
pub use digest::{Digest, DigestAlgorithm, DIGEST_LEN};
pub use error::ValidationError;
pub use identity::{Identity, TokenId, IDENTITY_LEN};
pub use temporal::Timestamp;
