//! # Identities and Token Numbers
//!
//! Newtype wrappers for the two identifiers the issuance path deals in:
//! the claimant's account address and the sequential token number.
//!
//! ## Security Invariant
//!
//! The allow-list leaf is derived from the identity's raw 20 bytes, never
//! from its text form. Two spellings of the same address (`0xAB..` and
//! `0xab..`) therefore parse to the same `Identity` and the same leaf.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::hex;

/// Length in bytes of an account address.
pub const IDENTITY_LEN: usize = 20;

/// A claimant's account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Access the raw address bytes (the input to leaf hashing).
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// Parse from 40 hex characters, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        hex::decode_fixed::<IDENTITY_LEN>(s, "identity").map(Self)
    }

    /// Build a deterministic identity whose last eight bytes hold `n`.
    ///
    /// Useful for fixtures and simulations that need many distinct callers.
    pub fn from_index(n: u64) -> Self {
        let mut bytes = [0u8; IDENTITY_LEN];
        bytes[IDENTITY_LEN - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }
}

impl std::str::FromStr for Identity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({self})")
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A sequential token number assigned by the token registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl TokenId {
    /// Access the inner number.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
