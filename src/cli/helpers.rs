//! Shared helper functions for CLI commands
//!
//! Formatting and argument parsing used across several command modules.

use chrono::NaiveDate;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;

use crate::core::dates::parse_iso_date;
use crate::core::money::round2;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Money with 2 decimals and thousands separators, e.g. `1,234,567.50`
pub fn format_money(amount: Decimal) -> String {
    let fixed = format!("{:.2}", round2(amount).abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !round2(amount).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Percentage with 2 decimals and a `%` suffix
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Parse an optional `YYYY-MM-DD` argument, falling back to `default`
pub fn date_arg(value: Option<&str>, default: impl FnOnce() -> NaiveDate) -> Result<NaiveDate> {
    match value {
        Some(raw) => parse_iso_date(raw).into_diagnostic(),
        None => Ok(default()),
    }
}
