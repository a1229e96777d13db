//! # rshield CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rshield_cli::build::{run_build, BuildArgs};
use rshield_cli::config::Config;
use rshield_cli::preflight::{run_preflight, PreflightArgs};
use rshield_cli::validate::{run_validate, ValidateArgs};
use rshield_cli::verify::{run_verify, VerifyArgs};

/// ReleaseShield: build tamper-evident release evidence packs.
///
/// Copies an audio master and cover art into a fixed folder layout, exports
/// the release metadata, records SHA-256 digests of every artifact, and
/// renders a PDF certificate.
#[derive(Parser, Debug)]
#[command(name = "rshield", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a release metadata file.
    Validate(ValidateArgs),

    /// Check audio duration and cover art dimensions.
    Preflight(PreflightArgs),

    /// Build a release pack.
    Build(BuildArgs),

    /// Verify a release pack against its evidence ledger.
    Verify(VerifyArgs),
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
        .init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Preflight(args) => run_preflight(&args, &config),
        Commands::Build(args) => run_build(&args, &config),
        Commands::Verify(args) => run_verify(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
