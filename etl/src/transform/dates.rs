//! Timestamp parsing and the DATE dimension.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::dimension::Dimension;
use crate::error::{TransformError, TransformResult};
use crate::models::{DateDim, SurrogateKey};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a source timestamp.
///
/// Values carrying a UTC offset keep their local wall-clock time.
/// Date-only values land on midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Distinct raw timestamps with their parsed values.
///
/// Deduplication is on the raw text, so two spellings of the same instant
/// get separate keys.
#[derive(Debug, Default)]
pub struct DateDimension {
    keys: Dimension<Option<String>>,
    parsed: Vec<Option<NaiveDateTime>>,
}

impl DateDimension {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for a raw timestamp; `row` is the 1-based data row for errors.
    pub fn intern(&mut self, raw: Option<String>, row: usize) -> TransformResult<SurrogateKey> {
        if let Some(key) = self.keys.key_of(&raw) {
            return Ok(key);
        }

        let parsed = match raw.as_deref() {
            Some(s) => Some(parse_timestamp(s).ok_or_else(|| TransformError::InvalidTimestamp {
                row,
                value: s.to_string(),
            })?),
            None => None,
        };

        self.parsed.push(parsed);
        Ok(self.keys.intern(raw))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_rows(self) -> Vec<DateDim> {
        self.keys
            .into_entries()
            .into_iter()
            .zip(self.parsed)
            .map(|((date_id, _), dt)| DateDim {
                dt,
                date_id,
                month: dt.map(|d| d.month() as i32),
                year: dt.map(|d| d.year()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_iso_date() {
        let dt = parse_timestamp("2021-05-03").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2021, 5, 3));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_us_twelve_hour() {
        let dt = parse_timestamp("05/08/2019 06:20:00 PM").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2019, 5, 8));
        assert_eq!((dt.hour(), dt.minute()), (18, 20));
    }

    #[test]
    fn test_parse_iso_with_fraction() {
        let dt = parse_timestamp("2019-05-08T18:20:00.000").unwrap();
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_parse_offset_keeps_wall_clock() {
        let dt = parse_timestamp("2021-12-31T23:30:00-06:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.hour()), (2021, 12, 23));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2021-13-01").is_none());
    }

    #[test]
    fn test_dimension_month_and_year() {
        let mut dim = DateDimension::new();
        let key = dim.intern(Some("2021-05-03".into()), 1).unwrap();
        assert_eq!(key, 1);

        let rows = dim.into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, Some(5));
        assert_eq!(rows[0].year, Some(2021));
    }

    #[test]
    fn test_dimension_dedups_on_raw_text() {
        let mut dim = DateDimension::new();
        let a = dim.intern(Some("2021-05-03".into()), 1).unwrap();
        let b = dim.intern(Some("05/03/2021".into()), 2).unwrap();
        let c = dim.intern(Some("2021-05-03".into()), 3).unwrap();

        assert_eq!((a, b, c), (1, 2, 1));
        assert_eq!(dim.len(), 2);
    }

    #[test]
    fn test_missing_timestamp_is_a_value() {
        let mut dim = DateDimension::new();
        dim.intern(None, 1).unwrap();

        let rows = dim.into_rows();
        assert_eq!(rows[0].dt, None);
        assert_eq!(rows[0].month, None);
        assert_eq!(rows[0].year, None);
    }

    #[test]
    fn test_invalid_timestamp_reports_row() {
        let mut dim = DateDimension::new();
        let err = dim.intern(Some("soon".into()), 4).unwrap_err();
        assert!(matches!(err, TransformError::InvalidTimestamp { row: 4, ref value } if value == "soon"));
        assert!(dim.is_empty());
    }
}
