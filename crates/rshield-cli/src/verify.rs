//! `rshield verify`: re-hash a pack against `Evidence/sha256.txt`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rshield_pack::EntryStatus;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Root folder of a built release pack.
    pub root: PathBuf,
}

pub fn run_verify(args: &VerifyArgs, _config: &Config) -> Result<u8> {
    let report = rshield_pack::verify_pack(&args.root)
        .with_context(|| format!("failed to verify {}", args.root.display()))?;

    for entry in &report.entries {
        let path = &entry.expected.relative_path;
        match &entry.status {
            EntryStatus::Match => println!("OK        {path}"),
            EntryStatus::Mismatch { actual } => {
                println!(
                    "MISMATCH  {path} (expected {}, got {actual})",
                    entry.expected.digest
                )
            }
            EntryStatus::Missing => println!("MISSING   {path}"),
        }
    }

    if report.is_intact() {
        println!("Pack intact: {} files verified.", report.entries.len());
        Ok(0)
    } else {
        println!(
            "Pack altered: {} of {} files failed.",
            report.failures().count(),
            report.entries.len()
        );
        Ok(1)
    }
}
