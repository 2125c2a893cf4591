//! # Inspect Subcommand
//!
//! Loads a drop configuration, validates it, and prints the values a
//! deployment would run with, including the derived window end.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use passgate_core::{Amount, Digest, Identity, Timestamp};
use passgate_crypto::AllowListFormat;
use passgate_issuance::DropConfig;

/// Arguments for the `passgate inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the drop configuration (YAML or JSON).
    #[arg(value_name = "DROP_CONFIG")]
    pub config: PathBuf,
}

/// Summary printed by `passgate inspect`.
#[derive(Debug, Serialize)]
pub struct DropSummary {
    pub name: String,
    pub root: Digest,
    pub allow_list: AllowListFormat,
    pub max_supply: u64,
    pub price: Amount,
    pub base_uri: String,
    pub window_start: Timestamp,
    pub window_end: Timestamp,
    pub admin: Identity,
    pub beneficiary: Identity,
    pub first_token_id: u64,
}

impl DropSummary {
    pub fn from_config(config: &DropConfig) -> Result<Self> {
        let window = config.window()?;
        Ok(Self {
            name: config.name.clone(),
            root: config.root,
            allow_list: config.allow_list,
            max_supply: config.max_supply,
            price: config.price,
            base_uri: config.base_uri.clone(),
            window_start: window.start(),
            window_end: window.end(),
            admin: config.admin,
            beneficiary: config.beneficiary,
            first_token_id: config.numbering.first().value(),
        })
    }
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let config = crate::load_config(&args.config)?;
    tracing::info!(drop = %config.name, "configuration is valid");
    crate::emit(&DropSummary::from_config(&config)?)?;
    Ok(0)
}
