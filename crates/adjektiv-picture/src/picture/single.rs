// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-adjective picture — one half of a split double picture.

use std::path::{Path, PathBuf};

use adjektiv_core::PictureFormat;
use adjektiv_core::error::Result;
use image::DynamicImage;
use tracing::{info, instrument};

use super::AdjectivePicture;
use super::backing::{self, Backing};
use crate::image::geometry;
use crate::image::processor::ImageProcessor;

/// A picture illustrating exactly one adjective.
///
/// If `has_subtitle` is false the image carries no subtitle band.
#[derive(Debug)]
pub struct SingleAdjectivePicture {
    backing: Backing,
    adjective: String,
    has_subtitle: bool,
    /// Where pictures derived from this one put their scratch files.
    scratch_dir: Option<PathBuf>,
}

impl SingleAdjectivePicture {
    /// Wrap an existing file without taking ownership of it.
    pub fn new(path: impl Into<PathBuf>, adjective: impl Into<String>, has_subtitle: bool) -> Self {
        Self {
            backing: Backing::Original(path.into()),
            adjective: adjective.into(),
            has_subtitle,
            scratch_dir: None,
        }
    }

    /// Persist `image` to a new scratch file and wrap it.
    pub fn from_image(
        image: &DynamicImage,
        adjective: impl Into<String>,
        has_subtitle: bool,
        format: PictureFormat,
        scratch_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let adjective = adjective.into();
        let backing = backing::write_scratch(
            image,
            &adjective,
            has_subtitle,
            format,
            scratch_dir.as_deref(),
        )?;
        Ok(Self {
            backing,
            adjective,
            has_subtitle,
            scratch_dir,
        })
    }

    /// Create derived scratch files in `dir` instead of the system temp dir.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn adjective(&self) -> &str {
        &self.adjective
    }

    /// Same adjective and same subtitle state.
    pub fn metadata_equal(&self, other: &Self) -> bool {
        self.adjective == other.adjective && self.has_subtitle == other.has_subtitle
    }

    /// Rescale the picture uniformly into a new scratch file.
    #[instrument(skip(self), fields(adjective = %self.adjective))]
    pub fn resize(&self, scale: f32) -> Result<Self> {
        let scaled = ImageProcessor::open(self.path())?.scale(scale)?;
        Self::from_image(
            scaled.as_dynamic(),
            self.adjective.clone(),
            self.has_subtitle,
            self.format(),
            self.scratch_dir.clone(),
        )
    }

    /// Copy the picture to `dest` and drop any scratch file behind it.
    pub fn persist(self, dest: impl AsRef<Path>) -> Result<PathBuf> {
        self.backing.persist(dest)
    }

    /// Delete the scratch file behind this picture, if it owns one.
    pub fn release(self) -> Result<()> {
        self.backing.release()
    }

    fn format(&self) -> PictureFormat {
        PictureFormat::from_path(self.path())
    }
}

impl AdjectivePicture for SingleAdjectivePicture {
    fn backing(&self) -> &Backing {
        &self.backing
    }

    fn has_subtitle(&self) -> bool {
        self.has_subtitle
    }

    #[instrument(skip(self), fields(adjective = %self.adjective, has_subtitle = self.has_subtitle))]
    fn remove_subtitles(self) -> Result<Self> {
        if !self.has_subtitle {
            return Ok(self);
        }
        let cropped = geometry::remove_subtitle_band(&self.render()?)?;
        info!(height = cropped.height(), "Removed subtitle band");
        Self::from_image(
            &cropped,
            self.adjective.clone(),
            false,
            self.format(),
            self.scratch_dir.clone(),
        )
    }
}
