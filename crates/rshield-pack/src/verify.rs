//! # Pack Verification
//!
//! Re-hashes the artifacts listed in a pack's `Evidence/sha256.txt` and
//! compares each against its recorded digest.
//!
//! ## Integrity Invariant
//!
//! A freshly built pack always verifies: every recorded digest is the
//! SHA-256 of the file as it sits on disk. Any later edit, truncation or
//! deletion of a listed artifact shows up as a mismatch or a missing entry.
//!
//! The ledger itself must cover the four hashed artifacts of every pack:
//! the audio master under `Masters/`, the cover under `Artwork/`, and both
//! metadata exports. An emptied or cut-down ledger is an error, not a pass.
//!
//! Ledger paths are resolved strictly inside the pack root. Absolute paths
//! and `..` segments are rejected rather than followed.

use std::io;
use std::path::{Path, PathBuf};

use rshield_core::naming::{
    ARTWORK_DIR, EVIDENCE_DIR, HASHES_FILE, MASTERS_DIR, METADATA_CSV_FILE, METADATA_DIR,
    METADATA_JSON_FILE,
};
use rshield_core::{hash_file, ContentDigest};

use crate::error::VerifyError;
use crate::evidence::{parse_numbered_ledger, HashLine};

/// Outcome for one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    /// The file's digest equals the recorded one.
    Match,
    /// The file exists but its content changed.
    Mismatch { actual: ContentDigest },
    /// The file is gone.
    Missing,
}

/// One checked ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEntry {
    pub expected: HashLine,
    pub status: EntryStatus,
}

/// Result of verifying a pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub root: PathBuf,
    /// Never empty.
    pub entries: Vec<VerifiedEntry>,
}

impl VerifyReport {
    /// Whether every entry matched.
    pub fn is_intact(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.status == EntryStatus::Match)
    }

    /// Entries that did not match.
    pub fn failures(&self) -> impl Iterator<Item = &VerifiedEntry> {
        self.entries.iter().filter(|e| e.status != EntryStatus::Match)
    }
}

/// Verify the pack rooted at `root`.
///
/// # Errors
///
/// - [`VerifyError::Ledger`] if `Evidence/sha256.txt` cannot be read.
/// - [`VerifyError::EmptyLedger`] or [`VerifyError::Incomplete`] if it does
///   not list every pack artifact.
/// - [`VerifyError::OutsidePack`] if a listed path escapes `root`.
pub fn verify_pack(root: &Path) -> Result<VerifyReport, VerifyError> {
    let ledger_path = root.join(EVIDENCE_DIR).join(HASHES_FILE);
    let text = std::fs::read_to_string(&ledger_path).map_err(|source| VerifyError::Ledger {
        path: ledger_path.clone(),
        source,
    })?;

    let numbered = parse_numbered_ledger(&text)?;
    if numbered.is_empty() {
        return Err(VerifyError::EmptyLedger { path: ledger_path });
    }

    let mut resolved = Vec::with_capacity(numbered.len());
    for (line, expected) in numbered {
        let file = resolve(root, &expected.relative_path).ok_or_else(|| {
            VerifyError::OutsidePack {
                line,
                path: expected.relative_path.clone(),
            }
        })?;
        resolved.push((expected, file));
    }

    let missing = uncovered_artifacts(resolved.iter().map(|(line, _)| line));
    if !missing.is_empty() {
        return Err(VerifyError::Incomplete { missing });
    }

    let mut entries = Vec::with_capacity(resolved.len());
    for (expected, file) in resolved {
        let status = match hash_file(&file) {
            Ok(actual) if actual == expected.digest => EntryStatus::Match,
            Ok(actual) => EntryStatus::Mismatch { actual },
            Err(e) if e.kind() == io::ErrorKind::NotFound => EntryStatus::Missing,
            Err(source) => return Err(VerifyError::Io { path: file, source }),
        };
        if status != EntryStatus::Match {
            tracing::warn!(path = %expected.relative_path, ?status, "evidence mismatch");
        }
        entries.push(VerifiedEntry { expected, status });
    }

    tracing::info!(root = %root.display(), entries = entries.len(), "verified release pack");
    Ok(VerifyReport {
        root: root.to_path_buf(),
        entries,
    })
}

/// Pack artifacts with no ledger entry, described for the error message.
fn uncovered_artifacts<'a>(lines: impl Iterator<Item = &'a HashLine> + Clone) -> Vec<String> {
    let in_dir = |dir: &str| {
        lines
            .clone()
            .any(|l| matches!(l.relative_path.split_once('/'), Some((d, _)) if d == dir))
    };
    let exact = |dir: &str, file: &str| {
        let wanted = format!("{dir}/{file}");
        lines.clone().any(|l| l.relative_path == wanted)
    };

    let mut missing = Vec::new();
    if !in_dir(MASTERS_DIR) {
        missing.push(format!("{MASTERS_DIR}/<audio>"));
    }
    if !in_dir(ARTWORK_DIR) {
        missing.push(format!("{ARTWORK_DIR}/<cover>"));
    }
    for file in [METADATA_JSON_FILE, METADATA_CSV_FILE] {
        if !exact(METADATA_DIR, file) {
            missing.push(format!("{METADATA_DIR}/{file}"));
        }
    }
    missing
}

/// Join a `/`-separated ledger path onto `root`, refusing to leave it.
fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    if relative.starts_with('/') || relative.contains('\\') {
        return None;
    }
    let mut path = root.to_path_buf();
    for segment in relative.split('/') {
        match segment {
            "" | "." | ".." => return None,
            s if s.contains(':') => return None,
            s => path.push(s),
        }
    }
    Some(path)
}
