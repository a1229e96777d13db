//! `rshield build`: assemble a release pack.
//!
//! Runs metadata validation, then media pre-flight (unless skipped), then
//! the pack build. The first two stop before anything is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rshield_core::BuildTimestamp;
use rshield_pack::{PackBuilderInput, PackManifest};
use rshield_probe::FileProbe;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the release metadata JSON file.
    pub metadata: PathBuf,

    /// Audio master to include.
    #[arg(long)]
    pub audio: PathBuf,

    /// Cover art to include.
    #[arg(long)]
    pub cover: PathBuf,

    /// Directory the pack folder is created in.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Build time naming the pack folder (RFC 3339 or YYYY-MM-DDTHH:MM:SS).
    /// Defaults to now.
    #[arg(long, value_parser = BuildTimestamp::parse)]
    pub timestamp: Option<BuildTimestamp>,

    /// Skip the audio duration and cover dimension checks.
    #[arg(long)]
    pub skip_preflight: bool,

    /// Print the manifest as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run_build(args: &BuildArgs, config: &Config) -> Result<u8> {
    let metadata = match crate::load_metadata(&args.metadata)? {
        Ok(metadata) => metadata,
        Err(err) => {
            crate::print_issues(&err);
            return Ok(1);
        }
    };

    if args.skip_preflight {
        tracing::info!("pre-flight skipped");
    } else {
        let report =
            rshield_probe::preflight(&FileProbe, &args.audio, &args.cover, &config.preflight);
        if !report.ok {
            crate::preflight::print_report(&report);
            return Ok(1);
        }
    }

    let output_directory = config.resolve_output_dir(args.output_dir.as_deref())?;
    let manifest = rshield_pack::build(PackBuilderInput {
        metadata,
        audio_path: args.audio.clone(),
        cover_path: args.cover.clone(),
        output_directory,
        timestamp: args.timestamp,
    })
    .context("failed to build release pack")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else {
        print_manifest(&manifest);
    }
    Ok(0)
}

fn print_manifest(manifest: &PackManifest) {
    println!("Release pack created: {}", manifest.root_path.display());
    for line in &manifest.hash_lines {
        println!("  {}  {}", line.digest, line.relative_path);
    }
    println!("  certificate: {}", manifest.files.certificate.display());
}
