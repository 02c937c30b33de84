//! JSON review files as a [`ReviewSource`].
//!
//! Accepts either a JSON array of review objects or JSON Lines (one object
//! per line). Column aliases from the raw export (`overall`, `day_diff`) are
//! understood; extra fields are ignored.

use std::path::PathBuf;

use revrank_core::error::SourceError;
use revrank_core::traits::ReviewSource;
use revrank_core::types::{Review, ReviewTable};

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse a review table from JSON text.
pub fn parse_reviews(text: &str) -> Result<ReviewTable, SourceError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| SourceError::Parse(e.to_string()));
    }

    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Review>(line)
                .map_err(|e| SourceError::Parse(format!("line {}: {e}", i + 1)))
        })
        .collect()
}

impl ReviewSource for JsonFileSource {
    fn load(&self) -> Result<ReviewTable, SourceError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Io(format!("{}: {e}", self.path.display())))?;
        parse_reviews(&text)
    }
}
