//! # Temporal Types — Calendar Dates
//!
//! Defines `PackingDate`, the calendar date a packing list was entered.
//! Serialized as ISO-8601 `YYYY-MM-DD` with no time-of-day or timezone
//! component — two documents entered on the same day compare equal
//! regardless of where they were keyed in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PackListError;

/// The calendar date of a packing list, rendered `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackingDate(NaiveDate);

impl PackingDate {
    /// Parse a date from an ISO-8601 `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid calendar date in
    /// that exact format.
    pub fn parse(s: &str) -> Result<Self, PackListError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| PackListError::InvalidDate(format!("{s:?}: {e}")))
    }

    /// Build a date from year/month/day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, PackListError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                PackListError::InvalidDate(format!("{year:04}-{month:02}-{day:02}"))
            })
    }

    /// Access the inner `chrono::NaiveDate`.
    pub fn as_date(&self) -> &NaiveDate {
        &self.0
    }
}

impl std::fmt::Display for PackingDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let d = PackingDate::parse("2026-01-15").unwrap();
        assert_eq!(d.to_string(), "2026-01-15");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PackingDate::parse("not-a-date").is_err());
        assert!(PackingDate::parse("2026-13-01").is_err());
        assert!(PackingDate::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_datetime() {
        assert!(PackingDate::parse("2026-01-15T12:00:00Z").is_err());
    }

    #[test]
    fn test_from_ymd() {
        let d = PackingDate::from_ymd(2026, 2, 28).unwrap();
        assert_eq!(d.to_string(), "2026-02-28");
        assert!(PackingDate::from_ymd(2026, 2, 30).is_err());
    }

    #[test]
    fn test_ordering() {
        let earlier = PackingDate::parse("2026-01-15").unwrap();
        let later = PackingDate::parse("2026-01-16").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_serde_is_iso8601() {
        let d = PackingDate::parse("2026-01-15").unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2026-01-15\"");
        let parsed: PackingDate = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }
}
