//! Export of flagged readings to shareable file formats.
//!
//! The renderer produces bytes; persisting them is a separate step so the
//! core has no filesystem dependency of its own.

pub mod csv;

use crate::source::types::MalformedReading;
use std::path::Path;

// Re-export commonly used types
pub use csv::{format_bpm, to_csv, CsvOptions, CSV_HEADER};

/// Default file stem for glitch exports.
pub const DEFAULT_EXPORT_STEM: &str = "HeartRateGlitches";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
}

impl OutputFormat {
    /// File name extension for this format, including the dot.
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => ".csv",
        }
    }
}

/// Errors raised while rendering or persisting an export.
#[derive(Debug)]
pub enum ExportError {
    /// A reading violates the start == end instantaneous-sample invariant
    Malformed(MalformedReading),
    /// The export destination could not be written
    Storage(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Malformed(m) => write!(f, "Malformed input: {m}"),
            ExportError::Storage(e) => write!(f, "Storage write error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Write export content to a file, creating parent directories as needed.
///
/// A write failure is reported with its cause; it is not retried.
pub fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ExportError::Storage(format!("{}: {e}", parent.display())))?;
    }
    std::fs::write(path, content)
        .map_err(|e| ExportError::Storage(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_extension() {
        assert_eq!(OutputFormat::Csv.file_extension(), ".csv");
    }

    #[test]
    fn test_write_file_round_trip() {
        let path = std::env::temp_dir()
            .join("hrglitch-export-test")
            .join("HeartRateGlitches.csv");

        write_file(&path, "HeartRate,Date\n").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "HeartRate,Date\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_failure_is_storage_error() {
        let path = Path::new("/proc/hrglitch-cannot-write-here/out.csv");
        match write_file(path, "HeartRate,Date\n") {
            Err(ExportError::Storage(_)) => {}
            other => panic!("expected Storage error, got {other:?}"),
        }
    }
}
