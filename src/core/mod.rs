//! Core glitch-detection functionality.
//!
//! This module contains:
//! - Named threshold/window policies for classifying glitches
//! - The single-pass scanner over ordered reading sequences

pub mod policy;
pub mod scanner;

// Re-export commonly used types
pub use policy::{GlitchLevel, GlitchPolicy, DEFAULT_THRESHOLD_BPM, DEFAULT_WINDOW_SECS};
pub use scanner::{scan, scan_lossy, ScanError, ScanOutcome};
