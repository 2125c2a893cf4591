//! # Drop Configuration
//!
//! Everything fixed at deployment, loaded from YAML or JSON:
//!
//! ```yaml
//! name: collectors-pass
//! root: "0x310aeb9a1979284d9124f81d2d128e2d08b3441c7eef588f3514dd878551f9fb"
//! max_supply: 6
//! base_uri: "ipfs://bafy.../"
//! price: "100000000000000000"      # smallest unit; 0 for free drops
//! window_start: "2026-03-01T00:00:00Z"
//! window_duration_secs: 86400
//! admin: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
//! beneficiary: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
//! allow_list:                      # optional
//!   algorithm: keccak256           # keccak256 | sha256
//!   leaf: identity                 # identity | indexed_identity
//! numbering: one_based             # optional; one_based | zero_based
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use passgate_core::{Amount, Digest, Identity, Timestamp};
use passgate_crypto::{AllowList, AllowListFormat};
use passgate_registry::TokenNumbering;
use passgate_state::MintWindow;

/// A configuration file could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// YAML parsing failed.
    #[error("failed to parse YAML config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing failed.
    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The values parse but cannot describe a drop.
    #[error("invalid drop config: {0}")]
    Invalid(String),
}

/// Deployment parameters of a drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DropConfig {
    /// Display name.
    pub name: String,
    /// Trusted allow-list root.
    pub root: Digest,
    /// Supply cap.
    pub max_supply: u64,
    /// Metadata prefix; a token's URI is this followed by its id.
    pub base_uri: String,
    /// Exact price per claim in the smallest unit.
    #[serde(default)]
    pub price: Amount,
    /// When allow-list claims open.
    #[serde(deserialize_with = "utc_timestamp")]
    pub window_start: Timestamp,
    /// Length of the allow-list window.
    pub window_duration_secs: u64,
    /// Administrator.
    pub admin: Identity,
    /// Withdrawal recipient.
    pub beneficiary: Identity,
    /// Proof format of the allow-list.
    #[serde(default)]
    pub allow_list: AllowListFormat,
    /// First token id convention.
    #[serde(default)]
    pub numbering: TokenNumbering,
}

fn utc_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
    let s = String::deserialize(deserializer)?;
    Timestamp::parse(&s).map_err(serde::de::Error::custom)
}

impl DropConfig {
    /// Parse YAML text and validate it.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON text and validate it.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Reject parameters no drop can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_supply == 0 {
            return Err(ConfigError::Invalid("max_supply must be positive".to_string()));
        }
        self.window()?;
        Ok(())
    }

    /// The allow-list window.
    pub fn window(&self) -> Result<MintWindow, ConfigError> {
        MintWindow::new(self.window_start, self.window_duration_secs)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// The trusted allow-list commitment.
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.root, self.allow_list)
    }
}
