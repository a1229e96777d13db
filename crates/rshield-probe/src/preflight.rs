//! # Pre-flight Rules
//!
//! Checks run on the input media before a pack is built. Audio and cover
//! are checked independently and every failure is reported, so a user can
//! fix both in one pass.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::probe::MediaProbe;

pub const AUDIO_UNREADABLE: &str = "Audio file could not be read.";
pub const COVER_UNREADABLE: &str = "Cover image could not be read.";
pub const COVER_DIMENSIONS_UNREADABLE: &str = "Cover image dimensions could not be read.";
pub const COVER_NOT_SQUARE: &str = "Cover image must be square (1:1). Please resize.";

/// Tunable pre-flight thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreflightRules {
    /// Audio must be strictly longer than this.
    pub min_audio_seconds: f64,
    pub require_square_cover: bool,
}

impl Default for PreflightRules {
    fn default() -> Self {
        Self {
            min_audio_seconds: 30.0,
            require_square_cover: true,
        }
    }
}

/// Outcome of [`preflight()`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreflightReport {
    pub ok: bool,
    pub errors: Vec<String>,
}

/// Check the audio master and cover art against `rules`.
pub fn preflight(
    probe: &dyn MediaProbe,
    audio: &Path,
    cover: &Path,
    rules: &PreflightRules,
) -> PreflightReport {
    let mut errors = Vec::new();

    match probe.audio_duration_secs(audio) {
        Ok(secs) if secs <= rules.min_audio_seconds => errors.push(format!(
            "Audio duration must be longer than {} seconds.",
            rules.min_audio_seconds
        )),
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(error = %e, "audio probe failed");
            errors.push(AUDIO_UNREADABLE.to_string());
        }
    }

    match probe.image_dimensions(cover) {
        Ok((0, _)) | Ok((_, 0)) => errors.push(COVER_DIMENSIONS_UNREADABLE.to_string()),
        Ok((w, h)) if rules.require_square_cover && w != h => {
            errors.push(COVER_NOT_SQUARE.to_string())
        }
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(error = %e, "cover probe failed");
            errors.push(COVER_UNREADABLE.to_string());
        }
    }

    if !errors.is_empty() {
        tracing::warn!(count = errors.len(), "pre-flight failed");
    }
    PreflightReport {
        ok: errors.is_empty(),
        errors,
    }
}
