//! Glitch classification policies.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default bpm delta above which a pair of readings qualifies as a glitch.
pub const DEFAULT_THRESHOLD_BPM: f64 = 10.0;

/// Default time window (seconds) within which a delta is considered abrupt.
pub const DEFAULT_WINDOW_SECS: i64 = 600;

/// Named sensitivity levels for glitch detection.
///
/// All three levels currently resolve to the same constants, matching prior
/// exports of this tool; per-level values can be overridden independently in
/// the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GlitchLevel {
    High,
    Medium,
    Low,
}

impl GlitchLevel {
    /// The built-in policy for this level.
    pub fn default_policy(&self) -> GlitchPolicy {
        match self {
            GlitchLevel::High | GlitchLevel::Medium | GlitchLevel::Low => GlitchPolicy {
                threshold_bpm: DEFAULT_THRESHOLD_BPM,
                window: Duration::seconds(DEFAULT_WINDOW_SECS),
            },
        }
    }
}

impl std::fmt::Display for GlitchLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlitchLevel::High => write!(f, "high"),
            GlitchLevel::Medium => write!(f, "medium"),
            GlitchLevel::Low => write!(f, "low"),
        }
    }
}

/// Immutable threshold/window configuration used to classify glitches.
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchPolicy {
    /// Minimum absolute bpm change for a reading to be flagged
    pub threshold_bpm: f64,
    /// Maximum elapsed time between consecutive readings for the delta to count
    pub window: Duration,
}

impl GlitchPolicy {
    pub fn new(threshold_bpm: f64, window: Duration) -> Self {
        Self {
            threshold_bpm,
            window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_share_default_constants() {
        let high = GlitchLevel::High.default_policy();
        let medium = GlitchLevel::Medium.default_policy();
        let low = GlitchLevel::Low.default_policy();

        assert_eq!(high, medium);
        assert_eq!(medium, low);
        assert_eq!(high.threshold_bpm, 10.0);
        assert_eq!(high.window, Duration::seconds(600));
    }
}
