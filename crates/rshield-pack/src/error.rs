//! # Pack Error Types
//!
//! Structured errors for building and verifying release packs.
//!
//! ## Design
//!
//! - Filesystem failures name the operation and the path involved, so a
//!   partially written pack can be diagnosed from the message alone.
//! - Certificate failures are a distinct variant: they can only happen in
//!   the final build step, after every other artifact has been written.

use std::io;
use std::path::{Path, PathBuf};

use rshield_core::error::DigestParseError;
use rshield_core::ValidationError;
use thiserror::Error;

/// Filesystem operation that failed during a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    CreateDir,
    Copy,
    Write,
    Hash,
}

impl std::fmt::Display for IoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::CreateDir => "create directory",
            Self::Copy => "copy",
            Self::Write => "write",
            Self::Hash => "hash",
        })
    }
}

/// Errors from [`build()`](crate::build).
#[derive(Error, Debug)]
pub enum PackError {
    /// Metadata failed validation; raised before any filesystem activity.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A filesystem operation failed; later steps were not attempted.
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        /// Operation that failed.
        op: IoOp,
        /// Path the operation targeted (the source path for copies).
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Certificate rendering failed in the final step.
    #[error("certificate rendering failed: {0}")]
    Render(#[from] RenderError),

    /// The metadata could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PackError {
    pub(crate) fn io(op: IoOp, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The I/O error kind, when this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Errors from rendering a certificate document.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The document was used out of order (e.g. a line before the title).
    #[error("document renderer misuse: {0}")]
    State(&'static str),

    /// The document could not be encoded.
    #[error("document encoding failed: {0}")]
    Encode(String),

    /// The output stream could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors from [`verify_pack()`](crate::verify_pack).
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The ledger file could not be read.
    #[error("cannot read evidence ledger {}: {source}", .path.display())]
    Ledger {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The ledger lists no artifacts.
    #[error("evidence ledger {} lists no artifacts", .path.display())]
    EmptyLedger { path: PathBuf },

    /// The ledger omits one of the artifacts every pack carries.
    #[error("evidence ledger does not cover: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },

    /// A ledger line is not `<relative path>  <64 hex digest>`.
    #[error("malformed evidence line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        reason: String,
    },

    /// A ledger line carries an unparsable digest.
    #[error("bad digest on evidence line {line}: {source}")]
    Digest {
        line: usize,
        #[source]
        source: DigestParseError,
    },

    /// A listed path leaves the pack root.
    #[error("evidence line {line} points outside the pack: {path}")]
    OutsidePack { line: usize, path: String },

    /// A listed file exists but could not be read.
    #[error("cannot hash {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
