use thiserror::Error;

use passgate_core::{Identity, TokenId};

/// A registry lookup or mint that could not be served.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No token with this id has been minted.
    #[error("token {0} does not exist")]
    NonexistentToken(TokenId),

    /// Global enumeration index past the end.
    #[error("index {index} out of bounds for supply {total}")]
    IndexOutOfBounds {
        /// Requested index.
        index: u64,
        /// Tokens minted.
        total: u64,
    },

    /// Per-owner enumeration index past the owner's balance.
    #[error("index {index} out of bounds for owner {owner} holding {balance}")]
    OwnerIndexOutOfBounds {
        /// The owner being enumerated.
        owner: Identity,
        /// Requested index.
        index: u64,
        /// Tokens the owner holds.
        balance: u64,
    },

    /// The next id would not fit in a token id.
    #[error("token id space exhausted")]
    IdSpaceExhausted,
}
