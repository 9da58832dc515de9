//! In-memory sample source for tests and demos.

use crate::source::types::{Reading, SampleQuery};
use crate::source::{SampleSource, SourceError};

/// A sample source backed by a seeded vector of readings.
///
/// Can be constructed unauthorized to exercise the denial path without a
/// real health store.
#[derive(Debug, Clone)]
pub struct MemorySource {
    readings: Vec<Reading>,
    authorized: bool,
}

impl MemorySource {
    /// Create an authorized source over the given readings.
    pub fn new(readings: Vec<Reading>) -> Self {
        Self {
            readings,
            authorized: true,
        }
    }

    /// Create a source that denies authorization.
    pub fn unauthorized(readings: Vec<Reading>) -> Self {
        Self {
            readings,
            authorized: false,
        }
    }
}

impl SampleSource for MemorySource {
    fn authorize(&self) -> Result<(), SourceError> {
        if self.authorized {
            Ok(())
        } else {
            Err(SourceError::Unauthorized)
        }
    }

    fn fetch_readings(&self, query: &SampleQuery) -> Result<Vec<Reading>, SourceError> {
        if !self.authorized {
            return Err(SourceError::Unauthorized);
        }
        if self.readings.is_empty() {
            return Err(SourceError::NoData);
        }

        let mut readings = self.readings.clone();
        query.apply(&mut readings);
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_source_reports_no_data() {
        let source = MemorySource::new(vec![]);
        match source.fetch_readings(&SampleQuery::default()) {
            Err(SourceError::NoData) => {}
            other => panic!("expected NoData, got {other:?}"),
        }
    }

    #[test]
    fn test_unauthorized_source_denies_fetch() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let source = MemorySource::unauthorized(vec![Reading::instant(72.0, t0)]);

        assert!(matches!(
            source.authorize(),
            Err(SourceError::Unauthorized)
        ));
        assert!(matches!(
            source.fetch_readings(&SampleQuery::default()),
            Err(SourceError::Unauthorized)
        ));
    }

    #[test]
    fn test_fetch_honors_limit() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let source = MemorySource::new(vec![
            Reading::instant(72.0, t0),
            Reading::instant(95.0, t0 + chrono::Duration::seconds(60)),
            Reading::instant(94.0, t0 + chrono::Duration::seconds(120)),
        ]);

        let readings = source
            .fetch_readings(&SampleQuery {
                limit: Some(1),
                ascending: false,
            })
            .unwrap();

        // Descending by end time, so the limit keeps the most recent sample
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value, 94.0);
    }
}
