// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — loading/saving and the pure geometry behind splitting and
// subtitle removal.

pub mod geometry;
pub mod processor;

pub use processor::ImageProcessor;
