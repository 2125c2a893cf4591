//! # Digests: 32-Byte Hash Values and Algorithm Selection
//!
//! Defines `Digest` and `DigestAlgorithm`. Allow-list roots, leaves and proof
//! siblings are all `Digest` values; which hash function produced them is a
//! property of the deployment, carried by `DigestAlgorithm`.
//!
//! ## Security Invariant
//!
//! Every hash in the system is computed through [`DigestAlgorithm::digest()`]
//! or [`DigestAlgorithm::digest_parts()`]. A verifier configured for one
//! algorithm can never silently accept a tree built with another, because
//! the algorithm is an explicit, serialized part of the configuration.
//!
//! ## Text Form
//!
//! Digests render as `0x` followed by 64 lowercase hex characters, which is
//! the form off-system allow-list tooling emits for roots and proofs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use sha3::{Digest as _, Keccak256};

use crate::error::ValidationError;
use crate::hex;

/// Length in bytes of every digest handled by Passgate.
pub const DIGEST_LEN: usize = 32;

/// The hash function used for allow-list leaves and interior nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// Keccak-256 (the pre-standard SHA-3 padding), the default for
    /// allow-lists generated by EVM tooling.
    Keccak256,
    /// SHA-256.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
        }
    }

    /// Hash a single byte string.
    pub fn digest(&self, data: &[u8]) -> Digest {
        self.digest_parts(&[data])
    }

    /// Hash the concatenation of `parts` without allocating the joined buffer.
    pub fn digest_parts(&self, parts: &[&[u8]]) -> Digest {
        let mut out = [0u8; DIGEST_LEN];
        match self {
            Self::Keccak256 => {
                let mut hasher = Keccak256::new();
                for part in parts {
                    hasher.update(part);
                }
                out.copy_from_slice(&hasher.finalize());
            }
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    hasher.update(part);
                }
                out.copy_from_slice(&hasher.finalize());
            }
        }
        Digest(out)
    }
}

impl Default for DigestAlgorithm {
    fn default() -> Self {
        Self::Keccak256
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 32-byte digest.
///
/// Ordering is lexicographic over the raw bytes, which is the order the
/// sorted-pair Merkle rule uses when combining siblings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Digest = Digest([0u8; DIGEST_LEN]);

    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render as 64 lowercase hex characters without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from 64 hex characters, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        hex::decode_fixed::<DIGEST_LEN>(s, "digest").map(Self)
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl std::str::FromStr for Digest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest(0x{})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
