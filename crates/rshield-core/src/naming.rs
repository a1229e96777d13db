//! # Naming Policy — Release Pack Folder and File Names
//!
//! Pure functions producing every path segment of a release pack. Names
//! depend only on the metadata and the injected [`BuildTimestamp`], so two
//! builds with the same inputs lay out identical trees.
//!
//! ## Path Safety
//!
//! Every user-controlled string that becomes a path segment passes through
//! [`sanitize_for_filesystem()`], which replaces the characters reserved on
//! common filesystems (`\ / : * ? " < > |`) with `-`. A title can therefore
//! never introduce a separator or escape its folder.

use std::path::Path;

use crate::metadata::ReleaseMetadata;
use crate::temporal::BuildTimestamp;

/// Characters replaced by [`sanitize_for_filesystem()`].
pub const RESERVED_CHARACTERS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replacement for each reserved character.
pub const REPLACEMENT: char = '-';

/// Subfolder holding the copied audio master.
pub const MASTERS_DIR: &str = "Masters";
/// Subfolder holding the copied cover art.
pub const ARTWORK_DIR: &str = "Artwork";
/// Subfolder holding `metadata.json` and `metadata.csv`.
pub const METADATA_DIR: &str = "Metadata";
/// Subfolder holding `sha256.txt` and the certificate.
pub const EVIDENCE_DIR: &str = "Evidence";

/// Subfolders in creation order.
pub const PACK_SUBFOLDERS: [&str; 4] = [MASTERS_DIR, ARTWORK_DIR, METADATA_DIR, EVIDENCE_DIR];

pub const METADATA_JSON_FILE: &str = "metadata.json";
pub const METADATA_CSV_FILE: &str = "metadata.csv";
pub const HASHES_FILE: &str = "sha256.txt";
pub const CERTIFICATE_FILE: &str = "release-certificate.pdf";

/// Fixed track-number prefix; packs hold a single track.
const TRACK_PREFIX: &str = "01";

/// Replace every filesystem-reserved character with `-`.
pub fn sanitize_for_filesystem(s: &str) -> String {
    s.chars()
        .map(|c| {
            if RESERVED_CHARACTERS.contains(&c) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Render a timestamp as the fixed-width token `YYYYMMDD-HHMMSS`.
pub fn format_timestamp(timestamp: &BuildTimestamp) -> String {
    timestamp.to_token()
}

/// Root folder name: `"<sanitized releaseTitle> - <YYYYMMDD-HHMMSS>"`.
pub fn folder_name(metadata: &ReleaseMetadata, timestamp: &BuildTimestamp) -> String {
    format!(
        "{} - {}",
        sanitize_for_filesystem(metadata.release_title()),
        format_timestamp(timestamp)
    )
}

/// Audio master name: `"01 - <sanitized trackTitle><ext>"`.
///
/// `original_ext` includes the leading dot, or is empty.
pub fn audio_file_name(metadata: &ReleaseMetadata, original_ext: &str) -> String {
    format!(
        "{TRACK_PREFIX} - {}{original_ext}",
        sanitize_for_filesystem(metadata.track_title())
    )
}

/// Cover art name: `"cover<ext>"`.
pub fn cover_file_name(original_ext: &str) -> String {
    format!("cover{original_ext}")
}

/// The extension of `path` with its leading dot, case preserved.
///
/// Returns an empty string when the file name has no extension. Dot-files
/// such as `.hidden` have no extension.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
