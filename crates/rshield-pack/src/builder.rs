//! # Pack Builder
//!
//! The ordered build sequence for a release evidence package.
//!
//! 1. Resolve the build timestamp (injected, or now).
//! 2. Create `Masters`, `Artwork`, `Metadata`, `Evidence` under the root.
//! 3. Copy the audio master and cover art, keeping their extensions.
//! 4. Write `metadata.json` and `metadata.csv`.
//! 5. Hash audio, cover, JSON and CSV, in that order, into `sha256.txt`.
//! 6. Render the certificate from the metadata and those hash lines.
//! 7. Return the manifest.
//!
//! Each step runs only if the previous one succeeded. Nothing is rolled
//! back on failure.

use std::fs;
use std::path::{Path, PathBuf};

use rshield_core::naming::{
    self, ARTWORK_DIR, CERTIFICATE_FILE, EVIDENCE_DIR, HASHES_FILE, MASTERS_DIR, METADATA_CSV_FILE,
    METADATA_DIR, METADATA_JSON_FILE,
};
use rshield_core::{hash_file, BuildTimestamp, ReleaseMetadata};
use serde::Serialize;

use crate::certificate;
use crate::error::{IoOp, PackError};
use crate::evidence::{self, HashLine};
use crate::export;

/// Everything needed for one build.
#[derive(Debug, Clone)]
pub struct PackBuilderInput {
    pub metadata: ReleaseMetadata,
    /// Audio master to copy into `Masters/`.
    pub audio_path: PathBuf,
    /// Cover art to copy into `Artwork/`.
    pub cover_path: PathBuf,
    /// Directory under which the pack root folder is created.
    pub output_directory: PathBuf,
    /// Names the root folder; `None` means the current local time.
    pub timestamp: Option<BuildTimestamp>,
}

impl PackBuilderInput {
    /// Validate untyped metadata and assemble an input for the current time.
    ///
    /// Fails with [`PackError::Validation`] before anything touches the disk.
    pub fn from_raw(
        raw_metadata: &serde_json::Value,
        audio_path: impl Into<PathBuf>,
        cover_path: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
    ) -> Result<Self, PackError> {
        Ok(Self {
            metadata: rshield_core::validate_metadata(raw_metadata)?,
            audio_path: audio_path.into(),
            cover_path: cover_path.into(),
            output_directory: output_directory.into(),
            timestamp: None,
        })
    }

    /// Pin the timestamp that names the root folder.
    pub fn with_timestamp(mut self, timestamp: BuildTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Paths of the individual files in a built pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackFiles {
    pub audio: PathBuf,
    pub cover: PathBuf,
    pub metadata_json: PathBuf,
    pub metadata_csv: PathBuf,
    pub hashes: PathBuf,
    pub certificate: PathBuf,
}

/// Description of a successfully built pack. Every path exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackManifest {
    pub root_path: PathBuf,
    pub masters_path: PathBuf,
    pub artwork_path: PathBuf,
    pub metadata_path: PathBuf,
    pub evidence_path: PathBuf,
    pub files: PackFiles,
    /// The ledger entries written to `sha256.txt`, in order.
    #[serde(skip)]
    pub hash_lines: Vec<HashLine>,
}

/// Build a release pack.
///
/// # Errors
///
/// - [`PackError::Io`] if a directory cannot be created, an input cannot
///   be copied, or an output cannot be written or hashed.
/// - [`PackError::Render`] if the certificate cannot be produced.
///
/// Files written before the failing step remain on disk.
pub fn build(input: PackBuilderInput) -> Result<PackManifest, PackError> {
    let PackBuilderInput {
        metadata,
        audio_path,
        cover_path,
        output_directory,
        timestamp,
    } = input;

    // 1. Timestamp
    let timestamp = timestamp.unwrap_or_else(BuildTimestamp::now);

    // 2. Folder tree
    let output_directory = absolute(&output_directory)?;
    let root_path = output_directory.join(naming::folder_name(&metadata, &timestamp));
    tracing::info!(
        root = %root_path.display(),
        release = metadata.release_title(),
        timestamp = %timestamp,
        "building release pack"
    );

    let masters_path = root_path.join(MASTERS_DIR);
    let artwork_path = root_path.join(ARTWORK_DIR);
    let metadata_path = root_path.join(METADATA_DIR);
    let evidence_path = root_path.join(EVIDENCE_DIR);
    for dir in [&masters_path, &artwork_path, &metadata_path, &evidence_path] {
        fs::create_dir_all(dir).map_err(|e| PackError::io(IoOp::CreateDir, dir, e))?;
    }
    tracing::debug!("created pack folders");

    // 3. Inputs
    let audio = masters_path.join(naming::audio_file_name(
        &metadata,
        &naming::extension_of(&audio_path),
    ));
    let cover = artwork_path.join(naming::cover_file_name(&naming::extension_of(&cover_path)));
    copy_input(&audio_path, &audio)?;
    copy_input(&cover_path, &cover)?;

    // 4. Metadata exports
    let metadata_json = metadata_path.join(METADATA_JSON_FILE);
    let metadata_csv = metadata_path.join(METADATA_CSV_FILE);
    write_file(&metadata_json, export::metadata_json(&metadata)?.as_bytes())?;
    write_file(&metadata_csv, export::metadata_csv(&metadata).as_bytes())?;
    tracing::debug!("wrote metadata exports");

    // 5. Evidence ledger
    let hashes = evidence_path.join(HASHES_FILE);
    let mut hash_lines = Vec::with_capacity(4);
    for file in [&audio, &cover, &metadata_json, &metadata_csv] {
        let digest = hash_file(file).map_err(|e| PackError::io(IoOp::Hash, file, e))?;
        let line = HashLine::for_file(&root_path, file, digest).ok_or_else(|| {
            PackError::io(
                IoOp::Hash,
                file,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file is outside the pack root",
                ),
            )
        })?;
        tracing::debug!(path = %line.relative_path, digest = %line.digest, "hashed artifact");
        hash_lines.push(line);
    }
    write_file(&hashes, evidence::format_ledger(&hash_lines).as_bytes())?;

    // 6. Certificate
    let certificate = evidence_path.join(CERTIFICATE_FILE);
    certificate::render(&certificate, &metadata, &hash_lines)?;
    tracing::debug!("rendered certificate");

    tracing::info!(root = %root_path.display(), "release pack complete");

    // 7. Manifest
    Ok(PackManifest {
        root_path,
        masters_path,
        artwork_path,
        metadata_path,
        evidence_path,
        files: PackFiles {
            audio,
            cover,
            metadata_json,
            metadata_csv,
            hashes,
            certificate,
        },
        hash_lines,
    })
}

fn absolute(dir: &Path) -> Result<PathBuf, PackError> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| PackError::io(IoOp::CreateDir, dir, e))?;
    Ok(cwd.join(dir))
}

fn copy_input(from: &Path, to: &Path) -> Result<(), PackError> {
    fs::copy(from, to).map_err(|e| PackError::io(IoOp::Copy, from, e))?;
    tracing::debug!(from = %from.display(), to = %to.display(), "copied input");
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), PackError> {
    fs::write(path, contents).map_err(|e| PackError::io(IoOp::Write, path, e))
}
