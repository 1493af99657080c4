//! Conversion between review dates and their stored string form.
//!
//! Dates are written as RFC 3339 timestamps at UTC midnight so that older
//! databases holding full timestamps stay readable. Only the calendar date
//! matters for scheduling.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate};

/// Formats a date as `YYYY-MM-DDT00:00:00Z`
pub fn serialize_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00Z").to_string()
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// For timestamps the calendar date in the timestamp's own offset is kept.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Serde adapter for `review_date` fields
pub mod serde_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::serialize_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_is_rfc3339_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(serialize_date(date), "2024-03-01T00:00:00Z");
        assert_eq!(parse_date(&serialize_date(date)).unwrap(), date);
    }

    #[test]
    fn test_parse_keeps_date_in_own_offset() {
        let parsed = parse_date("2024-03-01T23:30:00-05:00").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_bare_date() {
        let parsed = parse_date(" 2023-12-31 ").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(parse_date("yesterday"), Err(Error::InvalidDate(_))));
    }
}
