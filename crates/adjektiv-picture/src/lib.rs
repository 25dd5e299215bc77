// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// adjektiv-picture — Image decomposition for scraped paired-adjective pictures.
//
// Derives the adjective pair from a scraped filename, splits a combined
// picture along its vertical midline, and crops away the fixed-height
// subtitle band. The batch driver runs that pipeline over a directory and
// reports per-item failures instead of stopping at the first one.

pub mod batch;
pub mod filename;
pub mod image;
pub mod picture;

// Re-export the primary items so callers can use `adjektiv_picture::DoubleAdjectivePicture` etc.
pub use batch::BatchProcessor;
pub use filename::{file_name_from_url, parse_adjectives};
pub use crate::image::processor::ImageProcessor;
pub use picture::backing::Backing;
pub use picture::double::DoubleAdjectivePicture;
pub use picture::single::SingleAdjectivePicture;
pub use picture::{AdjectivePicture, pixel_equal};
