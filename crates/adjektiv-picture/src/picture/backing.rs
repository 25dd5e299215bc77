// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backing files — the on-disk image behind every picture value.
//
// A scraped original is only ever borrowed by path. Derived pictures own a
// scratch file that disappears when the picture is dropped, unless it is
// persisted first.

use std::path::{Path, PathBuf};

use adjektiv_core::PictureFormat;
use adjektiv_core::error::Result;
use image::DynamicImage;
use tempfile::TempPath;
use tracing::{debug, instrument};

use crate::image::processor::ImageProcessor;

/// The file a picture reads its pixels from.
#[derive(Debug)]
pub enum Backing {
    /// A file the engine did not create and never deletes.
    Original(PathBuf),
    /// A scratch file owned by the picture.
    Scratch(TempPath),
}

impl Backing {
    pub fn path(&self) -> &Path {
        match self {
            Self::Original(path) => path.as_path(),
            Self::Scratch(temp) => &**temp,
        }
    }

    pub fn is_scratch(&self) -> bool {
        matches!(self, Self::Scratch(_))
    }

    /// Delete a scratch file now and report failure. Originals are left alone.
    pub fn release(self) -> Result<()> {
        match self {
            Self::Original(_) => Ok(()),
            Self::Scratch(temp) => {
                debug!(path = %temp.display(), "Releasing scratch file");
                temp.close()?;
                Ok(())
            }
        }
    }

    /// Move a scratch file to `dest`, or copy an original there.
    ///
    /// Scratch files are renamed, falling back to copy-and-delete when `dest`
    /// is on another filesystem. Persisting an original onto itself is a
    /// no-op.
    #[instrument(skip_all, fields(src = %self.path().display(), dest = %dest.as_ref().display()))]
    pub fn persist(self, dest: impl AsRef<Path>) -> Result<PathBuf> {
        let dest = dest.as_ref().to_path_buf();
        match self {
            Self::Original(src) => {
                if !same_file(&src, &dest) {
                    std::fs::copy(&src, &dest)?;
                }
            }
            Self::Scratch(temp) => {
                if let Err(err) = temp.persist(&dest) {
                    debug!(error = %err.error, "Rename failed, copying scratch file");
                    std::fs::copy(&err.path, &dest)?;
                    err.path.close()?;
                }
            }
        }
        Ok(dest)
    }
}

/// Whether both paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write `image` to a fresh scratch file named
/// `<adjective>[_subs]_<random>.<ext>` in `dir` (the system temp dir if unset).
pub fn write_scratch(
    image: &DynamicImage,
    adjective: &str,
    has_subtitle: bool,
    format: PictureFormat,
    dir: Option<&Path>,
) -> Result<Backing> {
    let prefix = format!(
        "{}{}_",
        file_stem(adjective),
        if has_subtitle { "_subs" } else { "" }
    );
    let suffix = format!(".{}", format.extension());

    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(&suffix);
    let file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }?;

    let temp = file.into_temp_path();
    ImageProcessor::from_dynamic(image.clone()).save_as(&temp, format)?;
    debug!(path = %temp.display(), "Wrote scratch file");
    Ok(Backing::Scratch(temp))
}

/// Filesystem-friendly form of an adjective (`nicht nett` -> `nicht-nett`).
pub fn file_stem(adjective: &str) -> String {
    adjective
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '-',
            other => other,
        })
        .collect()
}
