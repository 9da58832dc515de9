//! CSV rendering of flagged readings.

use crate::export::ExportError;
use crate::source::types::{MalformedReading, Reading};
use chrono_tz::Tz;

/// Header line of every CSV export.
pub const CSV_HEADER: &str = "HeartRate,Date";

/// Pattern the end timestamp is rendered with: `yyyy-MM-dd 'at' HH:mm`.
const DATE_PATTERN: &str = "%Y-%m-%d at %H:%M";

/// Formatting options for CSV export.
///
/// The timezone is an explicit configuration value rather than a hardcoded
/// locale; the date pattern itself contains no locale-variable tokens.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Timezone the end timestamp is rendered in
    pub timezone: Tz,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
        }
    }
}

/// Render readings as CSV content.
///
/// Produces the header line followed by one `value,formatted_end_time` line
/// per reading, each terminated by `\n`. An empty input yields exactly the
/// header line. Every reading must be instantaneous; the first violation
/// fails the export with a typed error.
pub fn to_csv(readings: &[Reading], options: &CsvOptions) -> Result<String, ExportError> {
    let mut content = String::from(CSV_HEADER);
    content.push('\n');

    for (index, reading) in readings.iter().enumerate() {
        if !reading.is_instantaneous() {
            return Err(ExportError::Malformed(MalformedReading {
                index,
                reading: reading.clone(),
            }));
        }

        let end = reading.end.with_timezone(&options.timezone);
        content.push_str(&format_bpm(reading.value));
        content.push(',');
        content.push_str(&end.format(DATE_PATTERN).to_string());
        content.push('\n');
    }

    Ok(content)
}

/// Render a bpm value with at least one decimal place.
///
/// Whole numbers keep a trailing `.0` ("95.0", not "95") so exported files
/// stay byte-compatible with prior exports of this tool.
pub fn format_bpm(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_empty_input_yields_header_only() {
        let content = to_csv(&[], &CsvOptions::default()).unwrap();
        assert_eq!(content, "HeartRate,Date\n");
    }

    #[test]
    fn test_single_reading_byte_exact() {
        let readings = vec![Reading::instant(95.0, at("2024-01-01T00:01:00Z"))];
        let content = to_csv(&readings, &CsvOptions::default()).unwrap();
        assert_eq!(content, "HeartRate,Date\n95.0,2024-01-01 at 00:01\n");
    }

    #[test]
    fn test_rows_preserve_input_order() {
        let t0 = at("2024-01-01T00:00:00Z");
        let readings = vec![
            Reading::instant(95.0, t0 + Duration::seconds(60)),
            Reading::instant(120.5, t0 + Duration::seconds(120)),
        ];
        let content = to_csv(&readings, &CsvOptions::default()).unwrap();
        assert_eq!(
            content,
            "HeartRate,Date\n\
             95.0,2024-01-01 at 00:01\n\
             120.5,2024-01-01 at 00:02\n"
        );
    }

    #[test]
    fn test_timezone_shifts_rendered_date() {
        let readings = vec![Reading::instant(95.0, at("2024-01-01T00:01:00Z"))];
        let options = CsvOptions {
            timezone: chrono_tz::Asia::Seoul,
        };
        let content = to_csv(&readings, &options).unwrap();
        // Seoul is UTC+9
        assert_eq!(content, "HeartRate,Date\n95.0,2024-01-01 at 09:01\n");
    }

    #[test]
    fn test_spanning_reading_fails_export() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let readings = vec![
            Reading::instant(95.0, t0),
            Reading::new(80.0, t0, t0 + Duration::seconds(30)),
        ];

        match to_csv(&readings, &CsvOptions::default()) {
            Err(ExportError::Malformed(m)) => assert_eq!(m.index, 1),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_format_bpm_keeps_one_decimal_for_whole_numbers() {
        assert_eq!(format_bpm(95.0), "95.0");
        assert_eq!(format_bpm(72.5), "72.5");
        assert_eq!(format_bpm(0.0), "0.0");
        assert_eq!(format_bpm(61.25), "61.25");
    }
}
