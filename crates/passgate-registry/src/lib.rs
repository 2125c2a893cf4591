//! # passgate-registry: Token Registry
//!
//! The issuance coordinator never stores tokens itself. It mints through a
//! [`TokenRegistry`], which owns ownership records, metadata locations, and
//! enumeration indexes.
//!
//! - `registry.rs`: the [`TokenRegistry`] trait, [`TokenNumbering`], and
//!   the mint [`TransferEvent`].
//! - `memory.rs`: [`InMemoryRegistry`], the registry used by the service and
//!   by tests.
//!
//! ## Enumeration
//!
//! Token ids are strictly sequential in mint order, starting at the
//! deployment's first id. Enumeration indexes are always 0-based, whatever
//! the numbering: `token_by_index(0)` is the first token minted.

pub mod error;
pub mod memory;
pub mod registry;

pub use error::RegistryError;
pub use memory::InMemoryRegistry;
pub use registry::{TokenNumbering, TokenRegistry, TransferEvent};
