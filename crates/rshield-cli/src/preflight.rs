//! `rshield preflight`: check input media against the configured rules.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rshield_probe::{FileProbe, PreflightReport};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct PreflightArgs {
    /// Audio master (WAV, FLAC, AIFF or MP3).
    #[arg(long)]
    pub audio: PathBuf,

    /// Cover art (PNG or JPEG).
    #[arg(long)]
    pub cover: PathBuf,
}

pub fn run_preflight(args: &PreflightArgs, config: &Config) -> Result<u8> {
    let report = rshield_probe::preflight(&FileProbe, &args.audio, &args.cover, &config.preflight);
    print_report(&report);
    Ok(if report.ok { 0 } else { 1 })
}

pub(crate) fn print_report(report: &PreflightReport) {
    if report.ok {
        println!("Pre-flight passed.");
        return;
    }
    println!("Pre-flight failed:");
    for error in &report.errors {
        println!("  - {error}");
    }
}
