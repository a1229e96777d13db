//! # Evidence Ledger — `sha256.txt`
//!
//! One line per hashed artifact, in hashing order:
//!
//! ```text
//! Masters/01 - Track Title.wav  3f0a…
//! Artwork/cover.png  91bc…
//! Metadata/metadata.json  07d2…
//! Metadata/metadata.csv  c4e8…
//! ```
//!
//! Paths are relative to the pack root and always use `/`, whatever the
//! host platform. The separator is exactly two spaces. Lines are joined by
//! `\n` with no trailing newline.

use std::fmt;
use std::path::{Component, Path};

use rshield_core::ContentDigest;

use crate::error::VerifyError;

/// Separator between path and digest.
pub const SEPARATOR: &str = "  ";

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLine {
    /// Path relative to the pack root, `/`-separated.
    pub relative_path: String,
    pub digest: ContentDigest,
}

impl HashLine {
    /// Build an entry for `file`, which must live under `root`.
    ///
    /// Returns `None` when `file` is not below `root`.
    pub fn for_file(root: &Path, file: &Path, digest: ContentDigest) -> Option<Self> {
        Some(Self {
            relative_path: relative_path(root, file)?,
            digest,
        })
    }
}

impl fmt::Display for HashLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.relative_path, self.digest.to_hex())
    }
}

/// `file` relative to `root`, joined with `/`.
pub fn relative_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Render the ledger text.
pub fn format_ledger(lines: &[HashLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse ledger text. Blank lines are skipped.
pub fn parse_ledger(text: &str) -> Result<Vec<HashLine>, VerifyError> {
    Ok(parse_numbered_ledger(text)?
        .into_iter()
        .map(|(_, entry)| entry)
        .collect())
}

/// Parse ledger text, pairing each entry with its 1-based source line.
pub fn parse_numbered_ledger(text: &str) -> Result<Vec<(usize, HashLine)>, VerifyError> {
    let mut entries = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let (path, hex) = raw
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| VerifyError::Malformed {
                line,
                reason: "expected `<path>  <digest>`".into(),
            })?;
        if path.is_empty() {
            return Err(VerifyError::Malformed {
                line,
                reason: "empty path".into(),
            });
        }
        let digest = ContentDigest::from_hex(hex)
            .map_err(|source| VerifyError::Digest { line, source })?;
        entries.push((
            line,
            HashLine {
                relative_path: path.to_string(),
                digest,
            },
        ));
    }
    Ok(entries)
}
