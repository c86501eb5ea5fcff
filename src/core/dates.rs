//! ISO date helpers
//!
//! All dates crossing the calculator boundary are `YYYY-MM-DD`.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::core::error::CalcError;

/// Format string for ISO 8601 calendar dates
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, CalcError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE).map_err(|_| CalcError::InvalidDate {
        value: value.to_string(),
    })
}

/// Format a date as `YYYY-MM-DD`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
