//! # Error Types
//!
//! Validation errors raised while constructing core primitives from
//! untrusted text (configuration files, HTTP bodies, CLI arguments).
//! All errors use `thiserror` for derive-based `Display` and `Error`.

use thiserror::Error;

/// A primitive could not be constructed from its external representation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input had the wrong number of hex digits.
    #[error("invalid {what}: expected {expected} hex chars, got {actual}")]
    InvalidLength {
        /// What was being parsed (e.g. "digest", "identity").
        what: &'static str,
        /// Expected number of hex characters.
        expected: usize,
        /// Actual number of hex characters.
        actual: usize,
    },

    /// Input contained characters outside `[0-9a-fA-F]`.
    #[error("invalid {what}: {reason}")]
    InvalidHex {
        /// What was being parsed.
        what: &'static str,
        /// Why decoding failed.
        reason: String,
    },

    /// Amount text was not a non-negative decimal within range.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Timestamp text or epoch value was rejected.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
