//! Sample sources supplying time-ordered heart-rate readings.
//!
//! The scanner and exporter depend only on the shape of the returned
//! sequence, never on how it is obtained. Sources are explicitly constructed
//! and passed in, so the core can be exercised against fakes without a real
//! health store.

pub mod file;
pub mod memory;
pub mod types;

use crossbeam_channel::{bounded, Receiver};
use std::thread;

// Re-export commonly used types
pub use file::FileSource;
pub use memory::MemorySource;
pub use types::{MalformedReading, Reading, SampleQuery};

/// Errors reported by a sample source.
#[derive(Debug)]
pub enum SourceError {
    /// The source denied read access to heart-rate data
    Unauthorized,
    /// The source has no samples matching the query
    NoData,
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Unauthorized => write!(f, "Source denied access to heart-rate data"),
            SourceError::NoData => write!(f, "Source has no heart-rate samples"),
            SourceError::IoError(e) => write!(f, "IO error: {e}"),
            SourceError::ParseError(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// A provider of time-ordered heart-rate readings.
pub trait SampleSource {
    /// Request read access to heart-rate data.
    fn authorize(&self) -> Result<(), SourceError>;

    /// Fetch readings sorted by end time per the query.
    ///
    /// The returned sequence is fully materialized and sorted before this
    /// method returns; callers may scan it immediately.
    fn fetch_readings(&self, query: &SampleQuery) -> Result<Vec<Reading>, SourceError>;
}

/// Run an authorize-then-fetch on a background thread.
///
/// The complete, sorted batch (or the first error) is delivered once over
/// the returned channel. A scanner consuming from this channel never sees a
/// partially delivered sequence.
pub fn spawn_fetch<S>(source: S, query: SampleQuery) -> Receiver<Result<Vec<Reading>, SourceError>>
where
    S: SampleSource + Send + 'static,
{
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let result = source
            .authorize()
            .and_then(|_| source.fetch_readings(&query));
        let _ = sender.send(result);
    });
    receiver
}
