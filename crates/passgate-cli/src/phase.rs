//! # Phase Subcommand
//!
//! Derives the phase of a drop at an instant. The administrative stage is
//! not part of the configuration, so it is passed on the command line and
//! defaults to the stage every drop starts in.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use passgate_core::Timestamp;
use passgate_state::{ClaimPath, MintPhase, MintStage};

/// Administrative stage, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    Scheduled,
    OpenMintActive,
    Ended,
}

impl From<StageArg> for MintStage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Scheduled => MintStage::Scheduled,
            StageArg::OpenMintActive => MintStage::OpenMintActive,
            StageArg::Ended => MintStage::Ended,
        }
    }
}

/// Arguments for the `passgate phase` subcommand.
#[derive(Args, Debug)]
pub struct PhaseArgs {
    /// Path to the drop configuration (YAML or JSON).
    #[arg(value_name = "DROP_CONFIG")]
    pub config: PathBuf,

    /// Instant to evaluate, RFC 3339 UTC with a `Z` suffix. Defaults to now.
    #[arg(long)]
    pub at: Option<String>,

    /// Administrative stage the drop has reached.
    #[arg(long, value_enum, default_value = "scheduled")]
    pub stage: StageArg,
}

/// Report printed by `passgate phase`.
#[derive(Debug, Serialize)]
pub struct PhaseReport {
    pub at: Timestamp,
    pub stage: MintStage,
    pub phase: MintPhase,
    pub allow_list_claims: bool,
    pub open_claims: bool,
}

/// Compute the phase report for `args`.
pub fn phase_report(args: &PhaseArgs) -> Result<PhaseReport> {
    let config = crate::load_config(&args.config)?;
    let window = config.window()?;
    let at = match &args.at {
        Some(text) => Timestamp::parse(text).with_context(|| format!("invalid --at: {text}"))?,
        None => Timestamp::now(),
    };
    let stage = MintStage::from(args.stage);
    let phase = MintPhase::derive(&window, stage, at);
    Ok(PhaseReport {
        at,
        stage,
        phase,
        allow_list_claims: phase.permits(ClaimPath::AllowList),
        open_claims: phase.permits(ClaimPath::Open),
    })
}

/// Execute the phase subcommand.
pub fn run_phase(args: &PhaseArgs) -> Result<u8> {
    let report = phase_report(args)?;
    tracing::debug!(phase = %report.phase, "phase derived");
    crate::emit(&report)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn args(file: &tempfile::NamedTempFile, at: &str, stage: StageArg) -> PhaseArgs {
        PhaseArgs {
            config: file.path().to_path_buf(),
            at: Some(at.to_string()),
            stage,
        }
    }

    #[test]
    fn before_during_and_after_window() {
        let file = fixtures::config_file();
        let before = phase_report(&args(&file, "2026-02-28T23:59:59Z", StageArg::Scheduled)).unwrap();
        assert_eq!(before.phase, MintPhase::BeforeWindow);
        assert!(!before.allow_list_claims);

        let during = phase_report(&args(&file, "2026-03-01T00:00:00Z", StageArg::Scheduled)).unwrap();
        assert_eq!(during.phase, MintPhase::WhitelistOpen);
        assert!(during.allow_list_claims);
        assert!(!during.open_claims);

        let after = phase_report(&args(&file, "2026-03-02T00:00:00Z", StageArg::Scheduled)).unwrap();
        assert_eq!(after.phase, MintPhase::WhitelistClosedOpenInactive);
    }

    #[test]
    fn stage_overrides_clock() {
        let file = fixtures::config_file();
        let report = phase_report(&args(&file, "2026-03-01T06:00:00Z", StageArg::Ended)).unwrap();
        assert_eq!(report.phase, MintPhase::AllEnded);
        assert!(!report.open_claims);
    }

    #[test]
    fn offset_timestamp_is_rejected() {
        let file = fixtures::config_file();
        let result = phase_report(&args(&file, "2026-03-01T06:00:00+02:00", StageArg::Scheduled));
        assert!(result.is_err());
    }
}
