//! # Tree Subcommand
//!
//! Builds an allow-list tree from a member file and writes the root with
//! each member's proof, ready to publish next to a drop configuration.
//!
//! The member file holds one identity per line. Blank lines and lines
//! starting with `#` are skipped. A member's leaf index is its position
//! among the identities, which is what indexed allow lists hash.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use passgate_core::{Digest, DigestAlgorithm, Identity};
use passgate_crypto::{AllowListFormat, AllowListTree, LeafEncoding, ProofPath};

/// Hash function, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Keccak256,
    Sha256,
}

/// Leaf rule, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LeafArg {
    Identity,
    IndexedIdentity,
}

/// Arguments for the `passgate tree` subcommand.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// File listing the allow-list members.
    #[arg(value_name = "MEMBERS")]
    pub members: PathBuf,

    /// Hash used for leaves and nodes.
    #[arg(long, value_enum, default_value = "keccak256")]
    pub algorithm: AlgorithmArg,

    /// Leaf construction rule.
    #[arg(long, value_enum, default_value = "identity")]
    pub leaf: LeafArg,

    /// Write the report here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

impl TreeArgs {
    fn format(&self) -> AllowListFormat {
        AllowListFormat {
            algorithm: match self.algorithm {
                AlgorithmArg::Keccak256 => DigestAlgorithm::Keccak256,
                AlgorithmArg::Sha256 => DigestAlgorithm::Sha256,
            },
            leaf: match self.leaf {
                LeafArg::Identity => LeafEncoding::Identity,
                LeafArg::IndexedIdentity => LeafEncoding::IndexedIdentity,
            },
        }
    }
}

/// One member's entry in the tree report.
#[derive(Debug, Serialize)]
pub struct MemberProof {
    pub identity: Identity,
    pub index: u64,
    pub proof: ProofPath,
}

/// Report produced by `passgate tree`.
#[derive(Debug, Serialize)]
pub struct TreeReport {
    pub root: Digest,
    #[serde(flatten)]
    pub format: AllowListFormat,
    pub depth: usize,
    pub members: Vec<MemberProof>,
}

/// Parse a member file.
pub fn read_members(path: &Path) -> Result<Vec<Identity>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read member file: {}", path.display()))?;
    let mut members = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let identity = Identity::from_hex(line)
            .with_context(|| format!("{}:{}: invalid identity", path.display(), number + 1))?;
        members.push(identity);
    }
    if members.is_empty() {
        bail!("member file lists no identities: {}", path.display());
    }
    Ok(members)
}

/// Build the report for `members`.
pub fn build_report(format: AllowListFormat, members: &[Identity]) -> Result<TreeReport> {
    let tree = AllowListTree::from_identities(format, members)?;
    let proofs = members
        .iter()
        .enumerate()
        .map(|(i, identity)| {
            Ok(MemberProof {
                identity: *identity,
                index: i as u64,
                proof: tree.proof(i)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TreeReport {
        root: tree.root(),
        format,
        depth: tree.depth(),
        members: proofs,
    })
}

/// Execute the tree subcommand.
pub fn run_tree(args: &TreeArgs) -> Result<u8> {
    let members = read_members(&args.members)?;
    let report = build_report(args.format(), &members)?;
    tracing::info!(members = members.len(), root = %report.root, "allow-list tree built");
    match &args.out {
        Some(out) => {
            let text = serde_json::to_string_pretty(&report)?;
            std::fs::write(out, text)
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => crate::emit(&report)?,
    }
    Ok(0)
}
