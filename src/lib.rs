//! hrglitch - heart-rate glitch scanner and CSV exporter.
//!
//! This library reads heart-rate samples from an injectable sample source,
//! flags abrupt rate changes ("glitches") against a threshold/time-window
//! policy, and renders the flagged samples as a shareable CSV file.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        hrglitch                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌─────────────┐   ┌──────────────┐  │
//! │  │ SampleSource │──▶│   Scanner   │──▶│   Exporter   │  │
//! │  │ (file/memory)│   │ (one pass)  │   │    (CSV)     │  │
//! │  └──────────────┘   └─────────────┘   └──────────────┘  │
//! │         │                  │                             │
//! │         ▼                  ▼                             │
//! │   channel fetch      glitch listing                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The scanner and exporter are pure, synchronous functions over immutable
//! sequences. The only asynchronous boundary is the fetch from the sample
//! source, delivered fully materialized and sorted over a channel.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use hrglitch::{scan, to_csv, CsvOptions, GlitchLevel, Reading};
//!
//! let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
//! let readings = vec![
//!     Reading::instant(72.0, t0),
//!     Reading::instant(95.0, t0 + Duration::seconds(60)),
//! ];
//!
//! let policy = GlitchLevel::High.default_policy();
//! let glitches = scan(&readings, &policy).unwrap();
//! assert_eq!(glitches.len(), 1);
//!
//! let csv = to_csv(&glitches, &CsvOptions::default()).unwrap();
//! assert!(csv.starts_with("HeartRate,Date\n"));
//! ```

pub mod config;
pub mod core;
pub mod export;
pub mod source;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError, LevelConfig, LevelSettings};
pub use core::{scan, scan_lossy, GlitchLevel, GlitchPolicy, ScanError, ScanOutcome};
pub use export::{
    to_csv, write_file, CsvOptions, ExportError, OutputFormat, CSV_HEADER, DEFAULT_EXPORT_STEM,
};
pub use source::{
    spawn_fetch, FileSource, MalformedReading, MemorySource, Reading, SampleQuery, SampleSource,
    SourceError,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
