// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filename semantics — recovers the adjective pair encoded in a scraped
// picture's filename, e.g. `wild_zahm_Adjektive_Deutsch_deutschlernerblog.png`.
//
// The grammar is closed: every irregular shape seen in the scraped data has
// its own arm below, and anything else is rejected rather than guessed at.

use std::path::Path;

use adjektiv_core::AdjectivePair;
use adjektiv_core::error::{AdjektivError, Result};
use tracing::debug;

/// Marker separating the adjective trunk from the rest of the filename.
const MARKER: &str = "Adjektive";

/// Parse the left and right adjective out of a scraped filename.
///
/// Any directory prefix is ignored. The words before `Adjektive` form the
/// trunk, separated by `_` (preferred) or `-`.
pub fn parse_adjectives(filename: &str) -> Result<AdjectivePair> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename);

    let marker_at = name
        .find(MARKER)
        .ok_or_else(|| AdjektivError::MalformedFilename(filename.to_owned()))?;
    if marker_at == 0 {
        return Err(AdjektivError::EmptyTrunk(filename.to_owned()));
    }

    // Drop the separator that joins the trunk to the marker.
    let mut chars = name[..marker_at].chars();
    chars.next_back();
    let trunk = chars.as_str();

    let separator = if trunk.contains('_') {
        '_'
    } else if trunk.contains('-') {
        '-'
    } else {
        return Err(AdjektivError::MissingSeparator(trunk.to_owned()));
    };

    let words: Vec<&str> = trunk.split(separator).collect();
    debug!(?words, %separator, "Split filename trunk");

    match words.as_slice() {
        [left, right] => Ok(AdjectivePair::new(*left, *right)),
        // `nett_nicht_nett` — the negation got split off by the separator.
        [left, "nicht", right] => Ok(AdjectivePair::new(*left, format!("nicht {right}"))),
        // A scraped file that carries a stray third adjective.
        ["neugierig", "gleichgültig", "unehrlich"] => {
            Ok(AdjectivePair::new("neugierig", "gleichgültig"))
        }
        // Duplicate upload disambiguated with a numeric suffix.
        [left, right, "2"] => Ok(AdjectivePair::new(*left, *right)),
        [_, _, _] => Err(AdjektivError::UnhandledWordPattern(owned(&words))),
        _ => Err(AdjektivError::UnexpectedWordCount(owned(&words))),
    }
}

/// Extract the filename from an image URL: everything after the last `/`,
/// ignoring any query string or fragment. The host of an absolute URL is
/// never taken for a filename.
pub fn file_name_from_url(url: &str) -> Result<&str> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let path = match without_query.split_once("://") {
        Some((_, rest)) => match rest.split_once('/') {
            Some((_authority, path)) => path,
            None => return Err(AdjektivError::MalformedFilename(url.to_owned())),
        },
        None => without_query,
    };
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(AdjektivError::MalformedFilename(url.to_owned())),
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_owned()).collect()
}
