//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! output_dir: /srv/exports
//! preflight:
//!   min_audio_seconds: 30
//!   require_square_cover: true
//! ```
//!
//! Command-line flags win over the file; the file wins over built-in
//! defaults. Unknown keys are rejected so typos do not pass silently.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rshield_probe::PreflightRules;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where packs are written when `--output-dir` is not given.
    pub output_dir: Option<PathBuf>,
    pub preflight: PreflightRules,
}

impl Config {
    /// Load from `path`, or return defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Output directory by precedence: flag, then config, then the
    /// current directory.
    pub fn resolve_output_dir(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = flag.or(self.output_dir.as_deref()) {
            return Ok(dir.to_path_buf());
        }
        std::env::current_dir().context("failed to determine current directory")
    }
}
