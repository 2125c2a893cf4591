//! Errors raised while building leaves, proofs, or fixture trees.

use thiserror::Error;

/// Error in allow-list cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The leaf rule needs the claimant's list position but none was supplied.
    #[error("leaf encoding {encoding} requires a leaf index")]
    MissingLeafIndex {
        /// The configured leaf encoding.
        encoding: &'static str,
    },

    /// A proof sibling could not be parsed.
    #[error("malformed proof element {position}: {reason}")]
    MalformedProof {
        /// Position of the offending sibling.
        position: usize,
        /// Why it was rejected.
        reason: String,
    },

    /// A tree needs at least one leaf.
    #[error("cannot build an allow-list tree with no leaves")]
    EmptyTree,

    /// The requested leaf position does not exist.
    #[error("leaf index {index} out of range for {len} leaves")]
    LeafOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of leaves in the tree.
        len: usize,
    },
}
