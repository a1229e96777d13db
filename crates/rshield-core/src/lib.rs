//! # rshield-core — Foundational Types for ReleaseShield
//!
//! This crate defines the leaf types every other ReleaseShield crate builds
//! on. It has no internal dependencies and performs no I/O apart from
//! reading files for digest computation.
//!
//! ## Key Design Principles
//!
//! 1. **Validated metadata only.** A [`ReleaseMetadata`] can only be produced
//!    by [`validate_metadata()`] or [`ReleaseMetadata::new()`]. The fields are
//!    private, so a built release pack never carries unchecked metadata.
//!
//! 2. **Pure naming.** Every folder and file name in a release pack is a pure
//!    function of the metadata and an injected [`BuildTimestamp`]. No module
//!    in this crate reads the wall clock except [`BuildTimestamp::now()`].
//!
//! 3. **One digest path.** File digests are SHA-256, streamed in fixed-size
//!    chunks, and rendered as lowercase hex by [`ContentDigest::to_hex()`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rshield-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::{hash_file, sha256_bytes, ContentDigest};
pub use error::{FieldIssue, IssueKind, ValidationError};
pub use metadata::{validate_metadata, ReleaseMetadata, CSV_HEADER_FIELDS};
pub use temporal::{BuildTimestamp, TimestampParseError};
