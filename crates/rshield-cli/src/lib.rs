//! # rshield-cli — ReleaseShield Command Line
//!
//! Provides the `rshield` binary.
//!
//! ## Subcommands
//!
//! - `rshield validate`: Check a metadata JSON file before packing.
//! - `rshield preflight`: Check audio duration and cover dimensions.
//! - `rshield build`: Validate inputs and assemble a release pack.
//! - `rshield verify`: Re-hash a pack against its evidence ledger.
//!
//! ```bash
//! rshield validate release.json
//! rshield build release.json --audio master.wav --cover cover.png --output-dir exports
//! rshield verify "exports/My Release - 20250101-120000"
//! ```
//!
//! Every handler returns the process exit code: `0` on success, `1` when
//! the input was checked and rejected. Unexpected failures surface as
//! errors and also exit with `1`.

pub mod build;
pub mod config;
pub mod preflight;
pub mod validate;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};
use rshield_core::{ReleaseMetadata, ValidationError};

/// Read a metadata file as untyped JSON.
pub fn read_metadata_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read metadata file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("metadata file {} is not valid JSON", path.display()))
}

/// Read and validate a metadata file.
///
/// The outer `Result` carries I/O and JSON syntax failures; the inner one
/// carries field-level rejections for the caller to report.
pub fn load_metadata(path: &Path) -> Result<Result<ReleaseMetadata, ValidationError>> {
    let raw = read_metadata_json(path)?;
    Ok(rshield_core::validate_metadata(&raw))
}

/// Print each validation issue on its own line.
pub fn print_issues(err: &ValidationError) {
    println!("Metadata is invalid:");
    for issue in &err.issues {
        println!("  - {issue}");
    }
}
