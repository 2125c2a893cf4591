//! # Leaf Construction
//!
//! The leaf rule must match, byte for byte, whatever rule built the trusted
//! tree off-system. It is therefore explicit, versioned configuration rather
//! than a hard-coded hash call:
//!
//! | Version | Encoding           | Leaf                                   |
//! |---------|--------------------|----------------------------------------|
//! | 1       | `identity`         | `H(identity)`                          |
//! | 2       | `indexed_identity` | `H(uint256_be(index) \|\| identity)`   |
//!
//! `H` is the deployment's [`DigestAlgorithm`]. Version 1 is what
//! `keccak256(abi.encodePacked(address))` produces; version 2 binds each
//! entry to its position in the list.

use passgate_core::{Digest, DigestAlgorithm, Identity};
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// How an identity is turned into leaf bytes before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeafEncoding {
    /// Version 1: the raw 20 identity bytes.
    #[default]
    Identity,
    /// Version 2: the list position as a 32-byte big-endian integer,
    /// followed by the raw identity bytes.
    IndexedIdentity,
}

impl LeafEncoding {
    /// Stable version number of this encoding.
    pub fn version(&self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::IndexedIdentity => 2,
        }
    }

    /// Configuration name of this encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::IndexedIdentity => "indexed_identity",
        }
    }

    /// Whether claims under this encoding must carry a leaf index.
    pub fn requires_index(&self) -> bool {
        matches!(self, Self::IndexedIdentity)
    }
}

impl std::fmt::Display for LeafEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (v{})", self.as_str(), self.version())
    }
}

/// The complete proof format of an allow-list: which hash, which leaf rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct AllowListFormat {
    /// Hash used for leaves and interior nodes.
    #[serde(default)]
    pub algorithm: DigestAlgorithm,
    /// Leaf construction rule.
    #[serde(default)]
    pub leaf: LeafEncoding,
}

impl AllowListFormat {
    /// Construct a format.
    pub fn new(algorithm: DigestAlgorithm, leaf: LeafEncoding) -> Self {
        Self { algorithm, leaf }
    }

    /// Compute the leaf digest for `identity`.
    ///
    /// `index` is required by [`LeafEncoding::IndexedIdentity`] and ignored
    /// by [`LeafEncoding::Identity`].
    pub fn leaf_hash(&self, identity: &Identity, index: Option<u64>) -> Result<Digest, CryptoError> {
        match self.leaf {
            LeafEncoding::Identity => Ok(self.algorithm.digest(identity.as_bytes())),
            LeafEncoding::IndexedIdentity => {
                let index = index.ok_or(CryptoError::MissingLeafIndex {
                    encoding: self.leaf.as_str(),
                })?;
                let mut word = [0u8; 32];
                word[24..].copy_from_slice(&index.to_be_bytes());
                Ok(self
                    .algorithm
                    .digest_parts(&[&word, identity.as_bytes()]))
            }
        }
    }
}
