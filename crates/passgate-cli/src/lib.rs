//! # passgate-cli: Command-Line Tool
//!
//! Provides the `passgate` command for working with drop configurations
//! away from a running service.
//!
//! ## Subcommands
//!
//! - `passgate inspect`: load, validate and summarize a drop configuration.
//! - `passgate phase`: the phase a drop is in at a given instant.
//! - `passgate verify`: check an allow-list proof against a drop's root.
//! - `passgate tree`: build an allow-list tree and every member's proof.
//!
//! ```bash
//! passgate inspect drop.yaml
//! passgate phase drop.yaml --at 2026-03-02T00:00:00Z
//! passgate verify drop.yaml --identity 0x70997970... --proof 0xab..,0xcd..
//! passgate tree members.txt --out tree.json
//! ```
//!
//! Every handler returns the process exit code: 0 on success, 1 when a
//! check fails. Operational errors propagate as `anyhow::Error`.

pub mod inspect;
pub mod phase;
pub mod tree;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};

use passgate_issuance::DropConfig;

/// Load a drop configuration. Loading validates it.
pub fn load_config(path: &Path) -> Result<DropConfig> {
    DropConfig::load(path).with_context(|| format!("failed to load drop config: {}", path.display()))
}

/// Pretty-print a serializable report to stdout.
pub fn emit<T: serde::Serialize>(report: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(report).context("failed to render report")?;
    println!("{text}");
    Ok(())
}
