//! # Verify Subcommand
//!
//! Checks an allow-list proof for one identity against the root and proof
//! format of a drop configuration. Exit code 0 when the proof is valid,
//! 1 when it is not.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use passgate_core::Identity;
use passgate_crypto::{ClaimTicket, ProofPath};

/// Arguments for the `passgate verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the drop configuration (YAML or JSON).
    #[arg(value_name = "DROP_CONFIG")]
    pub config: PathBuf,

    /// Claimant identity (20-byte hex).
    #[arg(long)]
    pub identity: String,

    /// Sibling hashes, leaf to root, comma-separated. Empty for a
    /// single-member list.
    #[arg(long, value_delimiter = ',')]
    pub proof: Vec<String>,

    /// Leaf index, for indexed allow lists.
    #[arg(long)]
    pub index: Option<u64>,
}

/// Whether the proof in `args` admits the identity.
pub fn check(args: &VerifyArgs) -> Result<bool> {
    let config = crate::load_config(&args.config)?;
    let identity = Identity::from_hex(&args.identity)
        .with_context(|| format!("invalid --identity: {}", args.identity))?;
    let proof = ProofPath::from_hex_strings(&args.proof).context("invalid --proof")?;
    let ticket = match args.index {
        Some(index) => ClaimTicket::indexed(proof, index),
        None => ClaimTicket::new(proof),
    };
    Ok(config.allow_list().verify(&identity, &ticket))
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    if check(args)? {
        println!("valid");
        Ok(0)
    } else {
        println!("invalid");
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn args(file: &tempfile::NamedTempFile, identity: Identity, proof: &ProofPath) -> VerifyArgs {
        VerifyArgs {
            config: file.path().to_path_buf(),
            identity: identity.to_string(),
            proof: proof.siblings().iter().map(|d| d.to_string()).collect(),
            index: None,
        }
    }

    #[test]
    fn member_proof_verifies() {
        let file = fixtures::config_file();
        let members = fixtures::members();
        let proof = fixtures::tree().proof(2).unwrap();
        assert!(check(&args(&file, members[2], &proof)).unwrap());
        assert_eq!(run_verify(&args(&file, members[2], &proof)).unwrap(), 0);
    }

    #[test]
    fn borrowed_proof_fails() {
        let file = fixtures::config_file();
        let members = fixtures::members();
        let proof = fixtures::tree().proof(2).unwrap();
        assert_eq!(run_verify(&args(&file, members[0], &proof)).unwrap(), 1);
    }

    #[test]
    fn malformed_sibling_is_an_error() {
        let file = fixtures::config_file();
        let mut bad = args(&file, fixtures::members()[0], &ProofPath::default());
        bad.proof = vec!["0xnothex".to_string()];
        assert!(check(&bad).is_err());
    }
}
