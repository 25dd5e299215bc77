// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Error triage for batch runs.
//
// Every error is mapped to a class that decides whether the batch driver
// skips the offending picture or stops the whole run, plus a plain message
// and a suggestion for whoever cleans up the input directory.

use serde::{Deserialize, Serialize};

use crate::error::AdjektivError;

/// How a failure affects the rest of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The input file itself is malformed (filename grammar, undecodable image).
    DirtyInput,
    /// The image has a layout the engine has no rule for.
    UnsupportedLayout,
    /// The machine is the problem: disk, permissions, bad configuration.
    Environment,
}

impl ErrorClass {
    /// Whether the batch driver may move on to the next item.
    pub fn skippable(&self) -> bool {
        !matches!(self, Self::Environment)
    }
}

/// A classified error with a readable message and an actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub message: String,
    pub suggestion: String,
    pub class: ErrorClass,
}

/// Classify an `AdjektivError` for batch decisions.
pub fn classify_error(err: &AdjektivError) -> ErrorClass {
    match err {
        AdjektivError::MalformedFilename(_)
        | AdjektivError::EmptyTrunk(_)
        | AdjektivError::MissingSeparator(_)
        | AdjektivError::UnexpectedWordCount(_)
        | AdjektivError::UnhandledWordPattern(_)
        | AdjektivError::ImageError(_) => ErrorClass::DirtyInput,

        AdjektivError::UnsupportedGeometry { .. } | AdjektivError::Unsupported { .. } => {
            ErrorClass::UnsupportedLayout
        }

        AdjektivError::Config(_) | AdjektivError::Serialization(_) => ErrorClass::Environment,

        AdjektivError::Io(io_err) => match io_err.kind() {
            // A file vanishing mid-run only affects that file.
            std::io::ErrorKind::NotFound => ErrorClass::DirtyInput,
            _ => ErrorClass::Environment,
        },
    }
}

/// Turn an error into a `Diagnosis` suitable for a batch report.
pub fn diagnose(err: &AdjektivError) -> Diagnosis {
    let class = classify_error(err);
    let suggestion = match err {
        AdjektivError::MalformedFilename(_) | AdjektivError::EmptyTrunk(_) => {
            "Rename the file to <adjective>_<adjective>_Adjektive_....".to_string()
        }
        AdjektivError::MissingSeparator(_) => {
            "Separate the adjectives with '_' or '-'.".to_string()
        }
        AdjektivError::UnexpectedWordCount(_) | AdjektivError::UnhandledWordPattern(_) => {
            "Fix the filename by hand or add a case for this pattern to the parser.".to_string()
        }
        AdjektivError::ImageError(_) => "Re-download the image; it could not be decoded.".to_string(),
        AdjektivError::UnsupportedGeometry { height, .. } => format!(
            "Only 402 and 803 px tall scrapes have a known subtitle band, this one is {height} px."
        ),
        AdjektivError::Unsupported { .. } => "Process this picture by hand.".to_string(),
        AdjektivError::Config(_) | AdjektivError::Serialization(_) => {
            "Check the pipeline configuration file.".to_string()
        }
        AdjektivError::Io(_) => "Check that the input and output directories are writable.".to_string(),
    };
    Diagnosis {
        message: err.to_string(),
        suggestion,
        class,
    }
}
