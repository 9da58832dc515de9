//! File-backed sample source.
//!
//! Reads a JSON array of readings from disk, standing in for the platform
//! health store. The file is re-read on every fetch so readings are always
//! created fresh.

use crate::source::types::{Reading, SampleQuery};
use crate::source::{SampleSource, SourceError};
use std::path::PathBuf;

/// A sample source backed by a JSON file of readings.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SampleSource for FileSource {
    fn authorize(&self) -> Result<(), SourceError> {
        if self.path.exists() {
            Ok(())
        } else {
            Err(SourceError::IoError(format!(
                "readings file not found: {}",
                self.path.display()
            )))
        }
    }

    fn fetch_readings(&self, query: &SampleQuery) -> Result<Vec<Reading>, SourceError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SourceError::IoError(format!("{}: {e}", self.path.display())))?;

        let mut readings: Vec<Reading> =
            serde_json::from_str(&content).map_err(|e| SourceError::ParseError(e.to_string()))?;

        if readings.is_empty() {
            return Err(SourceError::NoData);
        }

        query.apply(&mut readings);
        Ok(readings)
    }
}
