// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Picture values — a combined two-adjective picture and the single-adjective
// pictures split out of it.

pub mod backing;
pub mod double;
pub mod single;

use std::path::Path;

use adjektiv_core::PictureSize;
use adjektiv_core::error::Result;
use image::DynamicImage;

use crate::image::geometry;
use crate::image::processor::ImageProcessor;
use backing::Backing;

/// Capabilities shared by single and double adjective pictures.
pub trait AdjectivePicture: Sized {
    /// The file holding this picture's pixels.
    fn backing(&self) -> &Backing;

    /// Whether the picture still carries its subtitle band.
    fn has_subtitle(&self) -> bool;

    /// Return a picture without the subtitle band. A picture that has none is
    /// returned as is.
    fn remove_subtitles(self) -> Result<Self>;

    fn path(&self) -> &Path {
        self.backing().path()
    }

    fn size(&self) -> Result<PictureSize> {
        geometry::measure_file(self.path())
    }

    /// Decode the backing file.
    fn render(&self) -> Result<DynamicImage> {
        Ok(ImageProcessor::open(self.path())?.into_dynamic())
    }
}

/// Whether two pictures have identical pixels, regardless of metadata.
pub fn pixel_equal(a: &impl AdjectivePicture, b: &impl AdjectivePicture) -> Result<bool> {
    Ok(geometry::difference_bbox(&a.render()?, &b.render()?).is_none())
}
