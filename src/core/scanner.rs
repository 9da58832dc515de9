//! Glitch detection over an ordered sequence of readings.
//!
//! A glitch is a reading whose value differs from the immediately preceding
//! reading by more than a threshold, within a bounded time window. The scan
//! is a single left-to-right pass; comparisons are always against the
//! immediately preceding sample, never the last flagged one.

use crate::core::policy::GlitchPolicy;
use crate::source::types::{MalformedReading, Reading};

/// Errors raised by a strict scan.
#[derive(Debug)]
pub enum ScanError {
    /// A reading violates the start == end instantaneous-sample invariant
    Malformed(MalformedReading),
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Malformed(m) => write!(f, "Malformed input: {m}"),
        }
    }
}

impl std::error::Error for ScanError {}

/// Result of a lossy scan: flagged glitches plus the malformed readings
/// that were skipped.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub glitches: Vec<Reading>,
    pub skipped: Vec<MalformedReading>,
}

/// Scan an ordered sequence of readings for glitches.
///
/// The input must be sorted by end time, ascending. The first malformed
/// reading aborts the scan with a typed error; use [`scan_lossy`] to skip
/// malformed readings instead.
///
/// The output preserves input order and is always a subsequence of the
/// input. The first element is never flaggable. Empty and single-element
/// inputs produce empty output.
pub fn scan(readings: &[Reading], policy: &GlitchPolicy) -> Result<Vec<Reading>, ScanError> {
    let mut glitches = Vec::new();
    let mut previous: Option<&Reading> = None;

    for (index, reading) in readings.iter().enumerate() {
        if !reading.is_instantaneous() {
            return Err(ScanError::Malformed(MalformedReading {
                index,
                reading: reading.clone(),
            }));
        }
        if let Some(prev) = previous {
            if is_glitch(prev, reading, policy) {
                glitches.push(reading.clone());
            }
        }
        previous = Some(reading);
    }

    Ok(glitches)
}

/// Scan, skipping malformed readings instead of failing.
///
/// Skipped readings are reported in the outcome; the comparison state
/// advances over them as if they were absent, so the next well-formed
/// reading is compared against the last well-formed one.
pub fn scan_lossy(readings: &[Reading], policy: &GlitchPolicy) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let mut previous: Option<&Reading> = None;

    for (index, reading) in readings.iter().enumerate() {
        if !reading.is_instantaneous() {
            outcome.skipped.push(MalformedReading {
                index,
                reading: reading.clone(),
            });
            continue;
        }
        if let Some(prev) = previous {
            if is_glitch(prev, reading, policy) {
                outcome.glitches.push(reading.clone());
            }
        }
        previous = Some(reading);
    }

    outcome
}

fn is_glitch(previous: &Reading, current: &Reading, policy: &GlitchPolicy) -> bool {
    let elapsed = current.end - previous.end;
    let delta = (current.value - previous.value).abs();
    elapsed < policy.window && delta > policy.threshold_bpm
}
