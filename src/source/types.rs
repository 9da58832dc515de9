//! Heart-rate reading types shared by the source, scanner and exporter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single heart-rate observation.
///
/// Readings are read-only value objects: they are created fresh on each fetch
/// and never mutated. The scanner and exporter expect instantaneous readings,
/// where the measurement interval collapses to a single point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Heart rate in beats per minute
    pub value: f64,
    /// Start of the measurement interval
    pub start: DateTime<Utc>,
    /// End of the measurement interval
    pub end: DateTime<Utc>,
}

impl Reading {
    pub fn new(value: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { value, start, end }
    }

    /// Create an instantaneous reading (start == end).
    pub fn instant(value: f64, at: DateTime<Utc>) -> Self {
        Self {
            value,
            start: at,
            end: at,
        }
    }

    /// Whether this reading covers a single instant rather than a span.
    pub fn is_instantaneous(&self) -> bool {
        self.start == self.end
    }
}

/// A reading that failed the instantaneous-sample precondition.
///
/// Carried inside scan and export errors so callers can identify the
/// offending sample, skip it, or abort.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedReading {
    /// Position of the offending reading in the input sequence
    pub index: usize,
    /// The reading itself
    pub reading: Reading,
}

impl std::fmt::Display for MalformedReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reading at index {} spans {} ~ {} (expected an instantaneous sample)",
            self.index, self.reading.start, self.reading.end
        )
    }
}

/// Query parameters a sample source honors when fetching readings.
///
/// The time range is always "distant past" to "now"; only the result limit
/// and the end-time sort order are configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleQuery {
    /// Maximum number of readings to return (None = unlimited)
    pub limit: Option<usize>,
    /// Sort by end time ascending (true) or descending (false)
    pub ascending: bool,
}

impl Default for SampleQuery {
    fn default() -> Self {
        Self {
            limit: None,
            ascending: false,
        }
    }
}

impl SampleQuery {
    pub fn ascending(limit: Option<usize>) -> Self {
        Self {
            limit,
            ascending: true,
        }
    }

    /// Sort readings by end time per this query and apply the limit.
    ///
    /// Sources call this after materializing their raw samples so every
    /// implementation honors the same ordering contract.
    pub fn apply(&self, readings: &mut Vec<Reading>) {
        readings.sort_by_key(|r| r.end);
        if !self.ascending {
            readings.reverse();
        }
        if let Some(limit) = self.limit {
            readings.truncate(limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_instant_reading_is_instantaneous() {
        let reading = Reading::instant(72.0, at(0));
        assert!(reading.is_instantaneous());
        assert_eq!(reading.start, reading.end);
    }

    #[test]
    fn test_spanning_reading_is_not_instantaneous() {
        let reading = Reading::new(72.0, at(0), at(30));
        assert!(!reading.is_instantaneous());
    }

    #[test]
    fn test_query_sorts_ascending_and_limits() {
        let mut readings = vec![
            Reading::instant(80.0, at(120)),
            Reading::instant(72.0, at(0)),
            Reading::instant(95.0, at(60)),
        ];
        SampleQuery::ascending(Some(2)).apply(&mut readings);

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].value, 72.0);
        assert_eq!(readings[1].value, 95.0);
    }

    #[test]
    fn test_default_query_sorts_descending_unlimited() {
        let mut readings = vec![
            Reading::instant(72.0, at(0)),
            Reading::instant(80.0, at(120)),
            Reading::instant(95.0, at(60)),
        ];
        SampleQuery::default().apply(&mut readings);

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].value, 80.0);
        assert_eq!(readings[2].value, 72.0);
    }

    #[test]
    fn test_reading_json_round_trip() {
        let reading = Reading::instant(72.5, at(0));
        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }
}
