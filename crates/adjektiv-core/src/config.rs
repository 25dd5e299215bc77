// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AdjektivError, Result};

/// Settings for a batch run over scraped pictures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the scraped double pictures.
    pub input_dir: PathBuf,
    /// Directory the split single pictures are written to.
    pub output_dir: PathBuf,
    /// Where derived backing files are created (system temp dir if unset).
    pub scratch_dir: Option<PathBuf>,
    /// Whether the scraped pictures carry a subtitle band.
    pub source_has_subtitles: bool,
    /// Strip the subtitle band before splitting.
    pub remove_subtitles: bool,
    /// Downscale split pictures taller than this many pixels.
    pub downscale_above_height: Option<u32>,
    /// Scale factor applied when downscaling, in (0, 1].
    pub downscale_factor: f32,
    /// Stop the run on the first environment error instead of skipping.
    pub abort_on_environment_error: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images"),
            output_dir: PathBuf::from("out"),
            scratch_dir: None,
            source_has_subtitles: true,
            remove_subtitles: true,
            downscale_above_height: Some(400),
            downscale_factor: 0.5,
            abort_on_environment_error: true,
        }
    }
}

impl PipelineConfig {
    /// Read a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`PipelineConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path) {
            Err(AdjektivError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(AdjektivError::Config("input_dir is empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(AdjektivError::Config("output_dir is empty".into()));
        }
        if !(self.downscale_factor > 0.0 && self.downscale_factor <= 1.0) {
            return Err(AdjektivError::Config(format!(
                "downscale_factor must be in (0, 1], got {}",
                self.downscale_factor
            )));
        }
        Ok(())
    }
}
