// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch driver — runs every scraped picture in a directory through
// subtitle removal, splitting, and downscaling.
//
// Failures are handled per item: dirty input and unsupported layouts are
// recorded and skipped, environment errors stop the run unless the
// configuration says otherwise.

use std::path::{Path, PathBuf};

use adjektiv_core::error::Result;
use adjektiv_core::triage::diagnose;
use adjektiv_core::{BatchReport, PictureFormat, PipelineConfig, ProcessedPair, SkippedItem};
use tracing::{info, instrument, warn};

use crate::picture::AdjectivePicture;
use crate::picture::backing::file_stem;
use crate::picture::double::DoubleAdjectivePicture;

/// Processes a directory of scraped double pictures.
pub struct BatchProcessor {
    config: PipelineConfig,
}

impl BatchProcessor {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every file in the input directory, in name order.
    ///
    /// Only problems with the directories themselves (or an invalid
    /// configuration) are returned as errors; per-picture failures end up in
    /// the report.
    #[instrument(skip(self), fields(input = %self.config.input_dir.display()))]
    pub fn run(&self) -> Result<BatchReport> {
        self.config.validate()?;
        std::fs::create_dir_all(&self.config.output_dir)?;
        if let Some(scratch) = &self.config.scratch_dir {
            std::fs::create_dir_all(scratch)?;
        }

        let mut sources = Vec::new();
        for entry in std::fs::read_dir(&self.config.input_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                sources.push(entry.path());
            }
        }
        sources.sort();
        info!(count = sources.len(), "Found scraped pictures");

        let mut report = BatchReport::new();
        for source in sources {
            match self.process_one(&source) {
                Ok(pair) => {
                    info!(adjectives = %pair.adjectives, "Processed picture");
                    report.processed.push(pair);
                }
                Err(err) => {
                    let diagnosis = diagnose(&err);
                    if !diagnosis.class.skippable() && self.config.abort_on_environment_error {
                        warn!(source = %source.display(), error = %err, "Aborting batch run");
                        report.aborted = Some(diagnosis);
                        break;
                    }
                    warn!(source = %source.display(), error = %err, "Skipping picture");
                    report.skipped.push(SkippedItem { source, diagnosis });
                }
            }
        }

        report.finish();
        info!(
            processed = report.processed.len(),
            skipped = report.skipped.len(),
            aborted = report.aborted.is_some(),
            "Batch run finished"
        );
        Ok(report)
    }

    /// Turn one scraped picture into two single pictures in the output dir.
    #[instrument(skip_all, fields(source = %source.display()))]
    pub fn process_one(&self, source: &Path) -> Result<ProcessedPair> {
        let mut dap = DoubleAdjectivePicture::from_original(source, self.config.source_has_subtitles)?;
        if let Some(scratch) = &self.config.scratch_dir {
            dap = dap.with_scratch_dir(scratch);
        }
        if self.config.remove_subtitles {
            dap = dap.remove_subtitles()?;
        }

        let (mut left, mut right) = dap.split()?;
        if let Some(limit) = self.config.downscale_above_height {
            if left.size()?.height > limit {
                left = left.resize(self.config.downscale_factor)?;
                right = right.resize(self.config.downscale_factor)?;
            }
        }

        let adjectives = dap.adjectives().clone();
        let ext = PictureFormat::from_path(source).extension();
        let pair_stem = format!("{}_{}", file_stem(&adjectives.left), file_stem(&adjectives.right));
        let (left_path, right_path) = self.free_output_paths(&pair_stem, ext);
        let left_output = left.persist(left_path)?;
        let right_output = right.persist(right_path)?;

        Ok(ProcessedPair {
            source: source.to_path_buf(),
            adjectives,
            left_output,
            right_output,
        })
    }

    /// Output paths for a pair that do not clobber earlier outputs.
    ///
    /// Several scrapes can name the same pair (`laut_leise` and its
    /// `laut_leise_2` re-upload), so later ones get `-2`, `-3`, ... appended
    /// to the pair stem.
    fn free_output_paths(&self, pair_stem: &str, ext: &str) -> (PathBuf, PathBuf) {
        let mut stem = pair_stem.to_owned();
        let mut n = 1;
        loop {
            let left = self.output_path(&stem, "left", ext);
            let right = self.output_path(&stem, "right", ext);
            if !left.exists() && !right.exists() {
                if n > 1 {
                    info!(%stem, "Output name taken, using a numbered one");
                }
                return (left, right);
            }
            n += 1;
            stem = format!("{pair_stem}-{n}");
        }
    }

    fn output_path(&self, pair_stem: &str, side: &str, ext: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{pair_stem}-{side}.{ext}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::geometry;
    use crate::picture::fixtures;
    use adjektiv_core::PictureSize;
    use adjektiv_core::triage::ErrorClass;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn config_for(root: &Path) -> PipelineConfig {
        PipelineConfig {
            input_dir: root.join("images"),
            output_dir: root.join("out"),
            scratch_dir: Some(root.join("scratch")),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn processes_good_pictures_and_skips_bad_ones() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = config_for(root.path());
        std::fs::create_dir_all(&config.input_dir).expect("mkdir");

        fixtures::save(
            &config.input_dir,
            "wild_zahm_Adjektive_Deutsch_deutschlernerblog.png",
            &fixtures::double_image(402),
        );
        fixtures::save(
            &config.input_dir,
            "nett_nicht_nett_Adjektive_Deutsch_deutschlernerblog.png",
            &fixtures::double_image(803),
        );
        fixtures::save(&config.input_dir, "xyz.png", &fixtures::double_image(402));
        fixtures::save(
            &config.input_dir,
            "hell_dunkel_Adjektive_Deutsch.png",
            &fixtures::double_image(402).crop_imm(0, 0, 640, 380),
        );

        let report = BatchProcessor::new(config.clone()).run().expect("run");
        assert_eq!(report.processed.len(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.aborted.is_none());
        assert!(report.finished_at.is_some());

        let classes: Vec<ErrorClass> = report.skipped.iter().map(|s| s.diagnosis.class).collect();
        assert!(classes.contains(&ErrorClass::DirtyInput));
        assert!(classes.contains(&ErrorClass::UnsupportedLayout));

        let nett = report
            .processed
            .iter()
            .find(|p| p.adjectives.left == "nett")
            .expect("nett processed");
        assert_eq!(nett.adjectives.right, "nicht nett");
        assert_eq!(
            nett.right_output,
            config.output_dir.join("nett_nicht-nett-right.png")
        );
        // Double-row scrapes are halved after splitting.
        assert_eq!(
            geometry::measure_file(&nett.left_output).expect("measure"),
            PictureSize::new(160, 330)
        );

        let wild = report
            .processed
            .iter()
            .find(|p| p.adjectives.left == "wild")
            .expect("wild processed");
        assert_eq!(
            geometry::measure_file(&wild.right_output).expect("measure"),
            PictureSize::new(320, 330)
        );

        // Scratch files do not outlive the run.
        let leftovers = std::fs::read_dir(config.scratch_dir.as_ref().unwrap())
            .expect("scratch dir")
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn pictures_naming_the_same_pair_keep_separate_outputs() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = config_for(root.path());
        std::fs::create_dir_all(&config.input_dir).expect("mkdir");

        let solid = |colour: Rgba<u8>| {
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(640, 402, colour))
        };
        let red = Rgba([255, 0, 0, 255]);
        let blue = Rgba([0, 0, 255, 255]);
        fixtures::save(&config.input_dir, "laut_leise_2_Adjektive_Deutsch.png", &solid(red));
        fixtures::save(&config.input_dir, "laut_leise_Adjektive_Deutsch.png", &solid(blue));

        let report = BatchProcessor::new(config.clone()).run().expect("run");
        assert_eq!(report.processed.len(), 2);
        assert!(report.is_clean());

        let first = &report.processed[0];
        let second = &report.processed[1];
        assert_eq!(first.adjectives, second.adjectives);
        assert_ne!(first.left_output, second.left_output);
        assert_ne!(first.right_output, second.right_output);
        assert_eq!(
            second.left_output,
            config.output_dir.join("laut_leise-2-left.png")
        );
        assert_eq!(std::fs::read_dir(&config.output_dir).expect("out dir").count(), 4);

        // Sources are sorted, so the `_2` re-upload (red) came first.
        let first_pixel = *image::open(&first.left_output)
            .expect("open first")
            .to_rgba8()
            .get_pixel(0, 0);
        let second_pixel = *image::open(&second.left_output)
            .expect("open second")
            .to_rgba8()
            .get_pixel(0, 0);
        assert_eq!(first_pixel, red);
        assert_eq!(second_pixel, blue);
    }

    #[test]
    fn keeps_subtitles_when_configured() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = PipelineConfig {
            remove_subtitles: false,
            downscale_above_height: None,
            ..config_for(root.path())
        };
        std::fs::create_dir_all(&config.input_dir).expect("mkdir");
        fixtures::save(
            &config.input_dir,
            "wild_zahm_Adjektive_Deutsch_deutschlernerblog.png",
            &fixtures::double_image(402),
        );

        let report = BatchProcessor::new(config).run().expect("run");
        assert!(report.is_clean());
        let pair = &report.processed[0];
        assert_eq!(
            geometry::measure_file(&pair.left_output).expect("measure"),
            PictureSize::new(320, 402)
        );
    }

    #[test]
    fn missing_input_dir_is_an_error() {
        let root = tempfile::tempdir().expect("tempdir");
        let result = BatchProcessor::new(config_for(root.path())).run();
        assert!(result.is_err());
    }

    #[test]
    fn invalid_config_is_rejected_before_touching_disk() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = PipelineConfig {
            downscale_factor: 0.0,
            ..config_for(root.path())
        };
        assert!(BatchProcessor::new(config.clone()).run().is_err());
        assert!(!config.output_dir.exists());
    }
}
