// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — loading, exact cropping, uniform rescaling, and saving
// in the format of the scraped original. Operates on in-memory images using
// the `image` crate.

use std::path::Path;

use adjektiv_core::error::AdjektivError;
use adjektiv_core::{PictureFormat, PictureSize};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
///
/// ```ignore
/// ImageProcessor::open("wild_zahm_Adjektive.png")?
///     .crop(0, 0, 320, 330)?
///     .scale(0.5)?
///     .save_as("wild.png", PictureFormat::Png)?;
/// ```
#[derive(Debug)]
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AdjektivError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            image_error(err, format!("failed to open {}", path.as_ref().display()))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn size(&self) -> PictureSize {
        PictureSize::new(self.image.width(), self.image.height())
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Crop a rectangular region from the image.
    ///
    /// Unlike a clamped crop, a rectangle reaching past the image bounds is an
    /// error: splitting and subtitle removal depend on exact geometry.
    #[instrument(skip(self), fields(x, y, width, height))]
    pub fn crop(self, x: u32, y: u32, width: u32, height: u32) -> Result<Self, AdjektivError> {
        let (img_w, img_h) = (self.image.width(), self.image.height());
        let fits_x = x.checked_add(width).is_some_and(|right| right <= img_w);
        let fits_y = y.checked_add(height).is_some_and(|bottom| bottom <= img_h);
        if !fits_x || !fits_y || width == 0 || height == 0 {
            return Err(AdjektivError::ImageError(format!(
                "crop {width}x{height}+{x}+{y} does not fit a {img_w}x{img_h} image"
            )));
        }
        let cropped = self.image.crop_imm(x, y, width, height);
        Ok(Self { image: cropped })
    }

    /// Rescale both dimensions by `factor` (0 < factor <= 1) using Lanczos3
    /// filtering. Dimensions are rounded and never drop below one pixel.
    #[instrument(skip(self), fields(factor))]
    pub fn scale(self, factor: f32) -> Result<Self, AdjektivError> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(AdjektivError::Config(format!(
                "scale factor must be in (0, 1], got {factor}"
            )));
        }
        let width = ((self.image.width() as f32 * factor).round() as u32).max(1);
        let height = ((self.image.height() as f32 * factor).round() as u32).max(1);
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Rescaling image"
        );
        let resized =
            self.image
                .resize_exact(width, height, image::imageops::FilterType::Lanczos3);
        Ok(Self { image: resized })
    }

    // -- Output ---------------------------------------------------------------

    /// Write the image to `path` in the given format.
    pub fn save_as(&self, path: impl AsRef<Path>, format: PictureFormat) -> Result<(), AdjektivError> {
        // JPEG has no alpha channel.
        let flattened;
        let image = if format == PictureFormat::Jpeg {
            flattened = DynamicImage::ImageRgb8(self.image.to_rgb8());
            &flattened
        } else {
            &self.image
        };
        image
            .save_with_format(path.as_ref(), image_format(format))
            .map_err(|err| {
                image_error(err, format!("failed to save image to {}", path.as_ref().display()))
            })
    }
}

/// Convert an `image` crate error, keeping I/O failures as I/O errors so a
/// full disk is not mistaken for a broken picture.
pub fn image_error(err: image::ImageError, context: String) -> AdjektivError {
    match err {
        image::ImageError::IoError(io_err) => AdjektivError::Io(io_err),
        other => AdjektivError::ImageError(format!("{context}: {other}")),
    }
}

/// Map a picture format onto the `image` crate's codec selector.
pub fn image_format(format: PictureFormat) -> ImageFormat {
    match format {
        PictureFormat::Png => ImageFormat::Png,
        PictureFormat::Jpeg => ImageFormat::Jpeg,
        PictureFormat::Gif => ImageFormat::Gif,
        PictureFormat::Bmp => ImageFormat::Bmp,
        PictureFormat::Webp => ImageFormat::WebP,
        PictureFormat::Tiff => ImageFormat::Tiff,
    }
}
