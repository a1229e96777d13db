//! # rshield-probe — Media Pre-flight
//!
//! Reads just enough of the input media to decide whether a release can be
//! packed: the audio master's duration and the cover art's pixel size.
//!
//! - [`MediaProbe`] is the capability; [`FileProbe`] implements it with
//!   `hound` (WAV), `symphonia` (FLAC, AIFF, MP3) and `image` (PNG, JPEG).
//! - [`preflight()`] applies [`PreflightRules`] and collects every failure
//!   into a [`PreflightReport`] instead of stopping at the first one.

pub mod error;
pub mod preflight;
pub mod probe;

pub use error::ProbeError;
pub use preflight::{preflight, PreflightReport, PreflightRules};
pub use probe::{FileProbe, MediaProbe};
