// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Double-adjective picture — a scraped picture showing two adjectives side
// by side, split into one single-adjective picture per half.

use std::path::PathBuf;

use adjektiv_core::error::Result;
use adjektiv_core::{AdjectivePair, PictureFormat};
use image::DynamicImage;
use tracing::{info, instrument};

use super::AdjectivePicture;
use super::backing::{self, Backing};
use super::single::SingleAdjectivePicture;
use crate::filename::parse_adjectives;
use crate::image::geometry;

/// A combined picture of two adjectives; `has_subtitle` applies to both halves.
#[derive(Debug)]
pub struct DoubleAdjectivePicture {
    backing: Backing,
    adjectives: AdjectivePair,
    has_subtitle: bool,
    scratch_dir: Option<PathBuf>,
}

impl DoubleAdjectivePicture {
    /// Wrap a scraped file, reading the adjectives from its filename.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_original(path: impl AsRef<std::path::Path>, has_subtitle: bool) -> Result<Self> {
        let path = path.as_ref();
        let adjectives = parse_adjectives(&path.to_string_lossy())?;
        info!(%adjectives, "Parsed adjectives from filename");
        Ok(Self {
            backing: Backing::Original(path.to_path_buf()),
            adjectives,
            has_subtitle,
            scratch_dir: None,
        })
    }

    /// Persist `image` to a new scratch file tagged with explicit adjectives.
    pub fn from_image(
        image: &DynamicImage,
        adjectives: AdjectivePair,
        has_subtitle: bool,
        format: PictureFormat,
        scratch_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let stem = format!("{}_{}", adjectives.left, adjectives.right);
        let backing =
            backing::write_scratch(image, &stem, has_subtitle, format, scratch_dir.as_deref())?;
        Ok(Self {
            backing,
            adjectives,
            has_subtitle,
            scratch_dir,
        })
    }

    /// Create derived scratch files in `dir` instead of the system temp dir.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn adjectives(&self) -> &AdjectivePair {
        &self.adjectives
    }

    pub fn left_adjective(&self) -> &str {
        &self.adjectives.left
    }

    pub fn right_adjective(&self) -> &str {
        &self.adjectives.right
    }

    /// Split into a left and a right single picture, each in its own new
    /// scratch file. `self` is left untouched.
    #[instrument(skip(self), fields(adjectives = %self.adjectives))]
    pub fn split(&self) -> Result<(SingleAdjectivePicture, SingleAdjectivePicture)> {
        let (left, right) = geometry::split_vertical_half(&self.render()?)?;
        let format = self.format();
        let left = SingleAdjectivePicture::from_image(
            &left,
            self.adjectives.left.clone(),
            self.has_subtitle,
            format,
            self.scratch_dir.clone(),
        )?;
        let right = SingleAdjectivePicture::from_image(
            &right,
            self.adjectives.right.clone(),
            self.has_subtitle,
            format,
            self.scratch_dir.clone(),
        )?;
        info!("Split double picture");
        Ok((left, right))
    }

    /// Delete the scratch file behind this picture, if it owns one.
    pub fn release(self) -> Result<()> {
        self.backing.release()
    }

    fn format(&self) -> PictureFormat {
        PictureFormat::from_path(self.path())
    }
}

impl AdjectivePicture for DoubleAdjectivePicture {
    fn backing(&self) -> &Backing {
        &self.backing
    }

    fn has_subtitle(&self) -> bool {
        self.has_subtitle
    }

    #[instrument(skip(self), fields(adjectives = %self.adjectives, has_subtitle = self.has_subtitle))]
    fn remove_subtitles(self) -> Result<Self> {
        if !self.has_subtitle {
            return Ok(self);
        }
        let cropped = geometry::remove_subtitle_band(&self.render()?)?;
        info!(height = cropped.height(), "Removed subtitle band");
        Self::from_image(
            &cropped,
            self.adjectives.clone(),
            false,
            self.format(),
            self.scratch_dir.clone(),
        )
    }
}
