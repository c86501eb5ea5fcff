//! Container free time and storage charges

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::core::dates::days_between;
use crate::core::money::round2;
use crate::entities::container::{ContainerStorageSummary, ContainerTracking, FreeTimeStatus};

/// Days of free time left at which a container is flagged as a warning
pub const FREE_TIME_WARNING_DAYS: i64 = 2;

/// Last day of free time: arrival plus the free-time allowance in calendar days
pub fn calculate_free_time_end(arrival_date: NaiveDate, free_time_days: u32) -> NaiveDate {
    arrival_date
        .checked_add_days(Days::new(u64::from(free_time_days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Chargeable storage days; zero when gate-out is on or before free-time end
pub fn calculate_storage_days(free_time_end: NaiveDate, gate_out_date: NaiveDate) -> i64 {
    days_between(free_time_end, gate_out_date).max(0)
}

/// Storage days times the daily rate, rounded to 2 decimals
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn calculate_storage_fee(storage_days: i64, daily_rate: Decimal) -> Decimal {
    if storage_days <= 0 {
        return Decimal::ZERO;
    }
    round2(Decimal::from(storage_days).saturating_mul(daily_rate))
}

/// Urgency of a free-time window as of `today`
pub fn get_free_time_status(free_time_end: Option<NaiveDate>, today: NaiveDate) -> FreeTimeStatus {
    get_free_time_status_with(free_time_end, today, FREE_TIME_WARNING_DAYS)
}

/// [`get_free_time_status`] with a configurable warning window
pub fn get_free_time_status_with(
    free_time_end: Option<NaiveDate>,
    today: NaiveDate,
    warning_days: i64,
) -> FreeTimeStatus {
    let Some(end) = free_time_end else {
        return FreeTimeStatus::Ok;
    };
    let remaining = days_between(today, end);
    if remaining < 0 {
        FreeTimeStatus::Critical
    } else if remaining <= warning_days {
        FreeTimeStatus::Warning
    } else {
        FreeTimeStatus::Ok
    }
}

/// Storage position of a container
///
/// A container still inside the terminal accrues storage up to `today`.
pub fn summarize_container_storage(
    container: &ContainerTracking,
    today: NaiveDate,
) -> ContainerStorageSummary {
    summarize_container_storage_with(container, today, FREE_TIME_WARNING_DAYS)
}

/// [`summarize_container_storage`] with a configurable warning window
pub fn summarize_container_storage_with(
    container: &ContainerTracking,
    today: NaiveDate,
    warning_days: i64,
) -> ContainerStorageSummary {
    let free_time_end = calculate_free_time_end(container.arrival_date, container.free_time_days);
    let until = container.gate_out_date.unwrap_or(today);
    let storage_days = calculate_storage_days(free_time_end, until);

    // Once the container has left, the window no longer matters
    let free_time_status = if container.gate_out_date.is_some() {
        FreeTimeStatus::Ok
    } else {
        get_free_time_status_with(Some(free_time_end), today, warning_days)
    };

    ContainerStorageSummary {
        container_number: container.container_number.clone(),
        free_time_end,
        storage_days,
        storage_fee: calculate_storage_fee(storage_days, container.daily_rate),
        free_time_status,
    }
}
