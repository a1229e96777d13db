//! # rshield-pack — Release Pack Builder
//!
//! Assembles a release evidence package on disk:
//!
//! ```text
//! <output>/<Release Title> - <YYYYMMDD-HHMMSS>/
//!     Masters/01 - <Track Title>.<ext>
//!     Artwork/cover.<ext>
//!     Metadata/metadata.json
//!     Metadata/metadata.csv
//!     Evidence/sha256.txt
//!     Evidence/release-certificate.pdf
//! ```
//!
//! - **Builder** (`builder.rs`): the ordered build sequence and the
//!   returned [`PackManifest`].
//! - **Exports** (`export.rs`): `metadata.json` and `metadata.csv` bytes.
//! - **Evidence** (`evidence.rs`): the `sha256.txt` ledger format.
//! - **Certificate** (`certificate.rs`, `pdf.rs`): the fixed certificate
//!   layout behind the [`DocumentRenderer`] capability, and its PDF backend.
//! - **Verify** (`verify.rs`): re-hash an existing pack against its ledger.
//!
//! ## Failure Model
//!
//! A build either returns a manifest of files that all exist, or an error.
//! There is no rollback: files written before a failing step stay on disk,
//! and cleaning up a partial root is the caller's responsibility.

pub mod builder;
pub mod certificate;
pub mod error;
pub mod evidence;
pub mod export;
pub mod pdf;
pub mod verify;

pub use builder::{build, PackBuilderInput, PackFiles, PackManifest};
pub use certificate::{render, render_certificate, DocumentRenderer, CERTIFICATE_TITLE};
pub use error::{IoOp, PackError, RenderError, VerifyError};
pub use evidence::{format_ledger, parse_ledger, HashLine};
pub use pdf::PdfRenderer;
pub use verify::{verify_pack, EntryStatus, VerifiedEntry, VerifyReport};
