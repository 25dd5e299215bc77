// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Adjektiv.

use thiserror::Error;

/// Top-level error type for all Adjektiv operations.
#[derive(Debug, Error)]
pub enum AdjektivError {
    // -- Filename errors --
    #[error("expected a filename containing 'Adjektive' but got: {0}")]
    MalformedFilename(String),

    #[error("expected a filename with adjectives before 'Adjektive' but got: {0}")]
    EmptyTrunk(String),

    #[error("expected '_' or '-' as word separator but got: {0}")]
    MissingSeparator(String),

    #[error("expected two or three words but got: {0:?}")]
    UnexpectedWordCount(Vec<String>),

    #[error("no handler for the three-word pattern {0:?}; add a case for it")]
    UnhandledWordPattern(Vec<String>),

    // -- Geometry errors --
    #[error("no subtitle band known for a {width}x{height} image")]
    UnsupportedGeometry { width: u32, height: u32 },

    #[error("{operation} is not supported: {reason}")]
    Unsupported {
        operation: &'static str,
        reason: String,
    },

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdjektivError {
    /// True for the deliberately unimplemented paths (`Unsupported` and
    /// `UnsupportedGeometry`), which callers may branch on instead of
    /// treating as a fault.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::Unsupported { .. } | Self::UnsupportedGeometry { .. }
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AdjektivError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_variants_are_flagged() {
        let geometry = AdjektivError::UnsupportedGeometry {
            width: 640,
            height: 500,
        };
        let split = AdjektivError::Unsupported {
            operation: "split",
            reason: "image is 1 px wide".into(),
        };
        assert!(geometry.is_unsupported());
        assert!(split.is_unsupported());
        assert!(!AdjektivError::MalformedFilename("xyz.png".into()).is_unsupported());
    }

    #[test]
    fn word_lists_are_named_in_messages() {
        let err = AdjektivError::UnhandledWordPattern(vec![
            "a".into(),
            "b".into(),
            "c".into(),
        ]);
        assert!(err.to_string().contains(r#"["a", "b", "c"]"#));
    }
}
