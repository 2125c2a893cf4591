//! # passgate CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use passgate_cli::inspect::{run_inspect, InspectArgs};
use passgate_cli::phase::{run_phase, PhaseArgs};
use passgate_cli::tree::{run_tree, TreeArgs};
use passgate_cli::verify::{run_verify, VerifyArgs};

/// Passgate allow-list drop tooling.
///
/// Inspects drop configurations, derives phases, verifies allow-list
/// proofs, and builds allow-list trees.
#[derive(Parser, Debug)]
#[command(name = "passgate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a drop configuration and summarize it.
    Inspect(InspectArgs),

    /// Derive the phase of a drop at an instant.
    Phase(PhaseArgs),

    /// Check an allow-list proof against a drop's root.
    Verify(VerifyArgs),

    /// Build an allow-list tree and every member's proof.
    Tree(TreeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Phase(args) => run_phase(&args),
        Commands::Verify(args) => run_verify(&args),
        Commands::Tree(args) => run_tree(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
