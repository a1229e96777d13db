//! `rshield validate`: check a metadata file without building anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the release metadata JSON file.
    pub metadata: PathBuf,
}

pub fn run_validate(args: &ValidateArgs, _config: &Config) -> Result<u8> {
    match crate::load_metadata(&args.metadata)? {
        Ok(metadata) => {
            println!(
                "Metadata OK: {} - {} ({})",
                metadata.primary_artist(),
                metadata.track_title(),
                metadata.release_title()
            );
            Ok(0)
        }
        Err(err) => {
            crate::print_issues(&err);
            Ok(1)
        }
    }
}
