// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Picture geometry — measuring, vertical-midline splitting, subtitle band
// removal, and pixel difference. Pure functions; inputs are never mutated.

use std::path::Path;

use adjektiv_core::PictureSize;
use adjektiv_core::error::{AdjektivError, Result};
use image::{DynamicImage, GenericImageView};
use imageproc::rect::Rect;
use tracing::{debug, instrument};

use crate::image::processor::{ImageProcessor, image_error};

/// Pixel dimensions of an in-memory image.
pub fn measure(image: &DynamicImage) -> PictureSize {
    image.dimensions().into()
}

/// Pixel dimensions of an image file, read from its header only.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn measure_file(path: impl AsRef<Path>) -> Result<PictureSize> {
    let dimensions = image::image_dimensions(path.as_ref()).map_err(|err| {
        image_error(
            err,
            format!("failed to read dimensions of {}", path.as_ref().display()),
        )
    })?;
    Ok(dimensions.into())
}

/// Split an image along its vertical midline.
///
/// The left half spans columns `[0, width / 2)`, the right half the rest, so
/// an odd extra column lands on the right.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn split_vertical_half(image: &DynamicImage) -> Result<(DynamicImage, DynamicImage)> {
    let (width, height) = image.dimensions();
    if width < 2 || height == 0 {
        return Err(AdjektivError::Unsupported {
            operation: "split",
            reason: format!("a {width}x{height} image has no two halves"),
        });
    }
    let mid = width / 2;
    let left = image.crop_imm(0, 0, mid, height);
    let right = image.crop_imm(mid, 0, width - mid, height);
    debug!(left_w = left.width(), right_w = right.width(), "Split along midline");
    Ok((left, right))
}

/// Rows kept above the subtitle band, keyed by total image height.
///
/// 402 px is a single-row scrape, 803 px a double-row one. No other layout
/// has been seen.
pub fn retained_height(height: u32) -> Option<u32> {
    match height {
        402 => Some(330),
        803 => Some(660),
        _ => None,
    }
}

/// Crop the subtitle band off the bottom of an image.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn remove_subtitle_band(image: &DynamicImage) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    let keep = retained_height(height)
        .ok_or(AdjektivError::UnsupportedGeometry { width, height })?;
    debug!(keep, "Cropping subtitle band");
    Ok(ImageProcessor::from_dynamic(image.clone())
        .crop(0, 0, width, keep)?
        .into_dynamic())
}

/// Bounding box of all pixels that differ between `a` and `b`.
///
/// `None` means the images are pixel-identical. Images of different sizes
/// always differ; the box then spans the larger extent of both.
pub fn difference_bbox(a: &DynamicImage, b: &DynamicImage) -> Option<Rect> {
    if a.dimensions() != b.dimensions() {
        let width = a.width().max(b.width()).max(1);
        let height = a.height().max(b.height()).max(1);
        return Some(Rect::at(0, 0).of_size(width, height));
    }

    let (a, b) = (a.to_rgba8(), b.to_rgba8());
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for ((x, y, pa), pb) in a.enumerate_pixels().zip(b.pixels()) {
        if pa == pb {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| {
        Rect::at(min_x as i32, min_y as i32).of_size(max_x - min_x + 1, max_y - min_y + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// Every pixel encodes its own coordinates, so any misplaced crop shows.
    fn coordinate_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x / 256) * 16 + y / 256) as u8, 255])
        }))
    }

    fn hconcat(left: &DynamicImage, right: &DynamicImage) -> DynamicImage {
        let mut joined = RgbaImage::new(left.width() + right.width(), left.height());
        image::imageops::replace(&mut joined, &left.to_rgba8(), 0, 0);
        image::imageops::replace(&mut joined, &right.to_rgba8(), left.width() as i64, 0);
        DynamicImage::ImageRgba8(joined)
    }

    #[test]
    fn measure_reports_dimensions() {
        assert_eq!(measure(&coordinate_image(640, 402)), PictureSize::new(640, 402));
    }

    #[test]
    fn measure_file_reads_the_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pic.png");
        coordinate_image(640, 402).save(&path).expect("save");
        assert_eq!(measure_file(&path).expect("measure"), PictureSize::new(640, 402));
    }

    #[test]
    fn measure_file_of_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = measure_file(dir.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, AdjektivError::Io(_)), "{err:?}");
    }

    #[test]
    fn split_halves_reconstruct_the_original() {
        let original = coordinate_image(640, 402);
        let (left, right) = split_vertical_half(&original).expect("split");
        assert_eq!(measure(&left), PictureSize::new(320, 402));
        assert_eq!(measure(&right), PictureSize::new(320, 402));
        assert!(difference_bbox(&hconcat(&left, &right), &original).is_none());
    }

    #[test]
    fn odd_width_gives_the_extra_column_to_the_right() {
        let original = coordinate_image(641, 10);
        let (left, right) = split_vertical_half(&original).expect("split");
        assert_eq!(left.width(), 320);
        assert_eq!(right.width(), 321);
        assert_eq!(right.to_rgba8().get_pixel(0, 0), original.to_rgba8().get_pixel(320, 0));
    }

    #[test]
    fn split_of_a_sliver_is_unsupported() {
        let err = split_vertical_half(&coordinate_image(1, 10)).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn subtitle_band_on_single_row_layout() {
        let cropped = remove_subtitle_band(&coordinate_image(640, 402)).expect("crop");
        assert_eq!(measure(&cropped), PictureSize::new(640, 330));
    }

    #[test]
    fn subtitle_band_on_double_row_layout() {
        let original = coordinate_image(640, 803);
        let cropped = remove_subtitle_band(&original).expect("crop");
        assert_eq!(measure(&cropped), PictureSize::new(640, 660));
        assert!(difference_bbox(&cropped, &original.crop_imm(0, 0, 640, 660)).is_none());
    }

    #[test]
    fn subtitle_band_on_unknown_layout_fails() {
        match remove_subtitle_band(&coordinate_image(640, 330)) {
            Err(AdjektivError::UnsupportedGeometry { width, height }) => {
                assert_eq!((width, height), (640, 330));
            }
            other => panic!("expected UnsupportedGeometry, got {other:?}"),
        }
    }

    #[test]
    fn difference_bbox_locates_changed_pixels() {
        let a = coordinate_image(20, 20);
        let mut changed = a.to_rgba8();
        changed.put_pixel(3, 4, Rgba([1, 2, 3, 0]));
        changed.put_pixel(10, 7, Rgba([1, 2, 3, 0]));
        let b = DynamicImage::ImageRgba8(changed);

        let bbox = difference_bbox(&a, &b).expect("images differ");
        assert_eq!((bbox.left(), bbox.top()), (3, 4));
        assert_eq!((bbox.width(), bbox.height()), (8, 4));
    }

    #[test]
    fn difference_bbox_of_different_sizes() {
        let bbox = difference_bbox(&coordinate_image(4, 2), &coordinate_image(2, 6))
            .expect("sizes differ");
        assert_eq!((bbox.width(), bbox.height()), (4, 6));
    }
}
