//! # Error Types
//!
//! Errors raised by the core types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Metadata validation reports every offending field at once, so a caller
//!   can show the complete list of problems in a single pass.
//! - Digest parsing errors carry the rejected input length or character.

use std::fmt;

use thiserror::Error;

/// Why a single metadata field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The field is absent from the input.
    Missing,
    /// The field is present but empty after trimming whitespace.
    Empty,
    /// The field has the wrong JSON type.
    WrongType {
        /// JSON type the field must have.
        expected: &'static str,
    },
    /// The input as a whole is not a JSON object.
    NotAnObject,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("is required"),
            Self::Empty => f.write_str("must not be empty"),
            Self::WrongType { expected } => write!(f, "must be a {expected}"),
            Self::NotAnObject => f.write_str("must be a JSON object"),
        }
    }
}

/// One rejected field in a metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Wire name of the field (e.g. `primaryArtist`), or `$` for the root.
    pub field: &'static str,
    /// What is wrong with it.
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.kind)
    }
}

/// Release metadata failed required-field or type checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid release metadata: {}", join_issues(.issues))]
pub struct ValidationError {
    /// Every offending field, in schema order.
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Wire names of the offending fields, in schema order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }

    /// Whether `field` is among the offending fields.
    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A hex string could not be parsed as a SHA-256 digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestParseError {
    /// The string is not exactly 64 characters long.
    #[error("digest must be 64 hex chars, got {0} chars")]
    InvalidLength(usize),

    /// The string contains a character outside `[0-9a-f]`.
    #[error("digest contains non-hex character {0:?}")]
    InvalidCharacter(char),
}
