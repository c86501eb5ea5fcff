//! Rounding helpers for monetary and percentage figures
//!
//! Every monetary computation boundary rounds to 2 decimal places using
//! round-half-away-from-zero. Keep all rounding going through this module.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for money
pub const MONEY_DP: u32 = 2;

/// Round a monetary amount to 2 decimals, half away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a floating point figure (percentages, tonnage) to 2 decimals
///
/// `f64::round` already rounds half away from zero, matching `round2`.
pub fn round2_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// Ratio of `part` to `whole` as a percentage rounded to 2 decimals; 0 when
/// `whole` is zero
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round2_f64(part / whole * 100.0)
}

/// Convert a money amount to `f64` for display or ratio maths
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
