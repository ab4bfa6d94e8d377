//! Calendar date type for observation rows and rate snapshots.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Day arithmetic used by dividend discounting (ACT/365 year fractions)
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::Date;
//!
//! let pricing = Date::from_ymd(2024, 1, 1).unwrap();
//! let dividend = Date::from_ymd(2024, 4, 10).unwrap();
//!
//! assert_eq!(dividend - pricing, 100);
//! assert!((pricing.year_fraction_to(dividend) - 100.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Days per year for ACT/365 fixed year fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Default textual date format (ISO 8601).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the day arithmetic needed for
/// dividend discounting and as-of lookups.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // US-style dates from vendor exports
/// let us = Date::parse_with_format("06/15/24", "%m/%d/%y").unwrap();
/// assert_eq!(us, date);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        Self::parse_with_format(s, ISO_DATE_FORMAT)
    }

    /// Parses a date using an explicit chrono format string.
    pub fn parse_with_format(s: &str, format: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), format)
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}' with format '{}': {}", s, format, e)))
    }

    /// Formats the date with a chrono format string.
    ///
    /// ```
    /// use pricer_core::types::Date;
    ///
    /// let date = Date::from_ymd(2024, 3, 5).unwrap();
    /// assert_eq!(date.format("%d.%m.%Y"), "05.03.2024");
    /// ```
    pub fn format(&self, format: &str) -> String {
        self.0.format(format).to_string()
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the date shifted by `days` calendar days.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 12, 30).unwrap();
    /// assert_eq!(d.add_days(3), Date::from_ymd(2025, 1, 2).unwrap());
    /// ```
    pub fn add_days(self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }

    /// ACT/365 year fraction from `self` to `end` (negative if `end` is earlier).
    #[inline]
    pub fn year_fraction_to(self, end: Date) -> f64 {
        (end - self) as f64 / DAYS_PER_YEAR
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_ymd_valid() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_from_ymd_invalid() {
        match Date::from_ymd(2023, 2, 29) {
            Err(DateError::InvalidDate { year, month, day }) => {
                assert_eq!((year, month, day), (2023, 2, 29));
            }
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_iso() {
        let date = Date::parse("2024-01-31").unwrap();
        assert_eq!(date, Date::from_ymd(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let date = Date::parse(" 2024-01-31 ").unwrap();
        assert_eq!(date.day(), 31);
    }

    #[test]
    fn test_parse_with_format_us_short_year() {
        let date = Date::parse_with_format("3/7/19", "%m/%d/%y").unwrap();
        assert_eq!(date, Date::from_ymd(2019, 3, 7).unwrap());
    }

    #[test]
    fn test_parse_error_mentions_input() {
        let err = Date::parse("2024-13-01").unwrap_err();
        assert!(format!("{}", err).contains("2024-13-01"));
    }

    #[test]
    fn test_sub_days() {
        let a = Date::from_ymd(2024, 1, 1).unwrap();
        let b = Date::from_ymd(2024, 3, 1).unwrap();
        // 2024 is a leap year: 31 + 29
        assert_eq!(b - a, 60);
        assert_eq!(a - b, -60);
    }

    #[test]
    fn test_add_days_round_trip() {
        let a = Date::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(a.add_days(100) - a, 100);
        assert_eq!(a.add_days(-1), Date::from_ymd(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_year_fraction_to() {
        let a = Date::from_ymd(2023, 1, 1).unwrap();
        let b = Date::from_ymd(2024, 1, 1).unwrap();
        assert_relative_eq!(a.year_fraction_to(b), 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.year_fraction_to(a), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display_iso() {
        let date = Date::from_ymd(2024, 6, 5).unwrap();
        assert_eq!(format!("{}", date), "2024-06-05");
    }

    #[test]
    fn test_ordering() {
        let a = Date::from_ymd(2024, 1, 1).unwrap();
        let b = Date::from_ymd(2024, 1, 2).unwrap();
        assert!(a < b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-06-15\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
