//! Depreciation engine
//!
//! Monthly depreciation for fixed assets using straight-line or
//! double-declining-balance, never taking an asset below its salvage value.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::core::dates::{first_of_month, today};
use crate::core::money::round2;
use crate::core::validation::ValidationResult;
use crate::entities::asset::{
    DepreciableAsset, DepreciationBatch, DepreciationMethod, DepreciationRecord,
    DepreciationResult, ScheduleEntry, SkippedAsset,
};

/// Skip reason recorded for assets already at salvage value
pub const FULLY_DEPRECIATED: &str = "Fully depreciated";

/// Depreciation for one month, rounded to 2 decimals and capped so the book
/// value never drops below salvage
///
/// Returns zero when the useful life is not positive.
pub fn calculate_depreciation(asset: &DepreciableAsset) -> Decimal {
    if asset.useful_life_months <= 0 {
        return Decimal::ZERO;
    }
    let life = Decimal::from(asset.useful_life_months);

    let raw = match asset.depreciation_method {
        DepreciationMethod::StraightLine => asset
            .purchase_cost
            .saturating_sub(asset.salvage_value)
            .checked_div(life)
            .unwrap_or(Decimal::ZERO),
        DepreciationMethod::DecliningBalance => {
            let rate = Decimal::from(2).checked_div(life).unwrap_or(Decimal::ZERO);
            asset.book_value.saturating_mul(rate)
        }
    };

    round2(raw)
        .max(Decimal::ZERO)
        .min(asset.depreciable_remaining())
}

/// An asset is fully depreciated once its book value has reached salvage
pub fn is_fully_depreciated(asset: &DepreciableAsset) -> bool {
    asset.book_value == asset.salvage_value
}

/// Book value after depreciation, floored at salvage
pub fn calculate_new_book_value(current: Decimal, depreciation: Decimal, salvage: Decimal) -> Decimal {
    round2(current.saturating_sub(depreciation).max(salvage))
}

/// Depreciation amount together with the resulting book value
pub fn calculate_depreciation_result(asset: &DepreciableAsset) -> DepreciationResult {
    let depreciation_amount = if is_fully_depreciated(asset) {
        Decimal::ZERO
    } else {
        calculate_depreciation(asset)
    };
    DepreciationResult {
        depreciation_amount,
        new_book_value: calculate_new_book_value(
            asset.book_value,
            depreciation_amount,
            asset.salvage_value,
        ),
    }
}

/// Check the figures an asset register entry must satisfy
pub fn validate_depreciation_inputs(asset: &DepreciableAsset) -> ValidationResult {
    if asset.purchase_cost < Decimal::ZERO {
        return ValidationResult::fail("Purchase cost cannot be negative");
    }
    if asset.salvage_value > asset.purchase_cost {
        return ValidationResult::fail("Salvage value cannot exceed purchase cost");
    }
    ValidationResult::ok()
}

/// Run depreciation for a period over a set of assets
///
/// Fully depreciated assets are reported in `skipped`. Assets whose computed
/// depreciation is zero for any other reason (e.g. no useful life) produce
/// neither a record nor a skip entry.
pub fn process_depreciation_batch(
    assets: &[DepreciableAsset],
    period_date: NaiveDate,
) -> DepreciationBatch {
    let mut batch = DepreciationBatch::default();

    for asset in assets {
        if is_fully_depreciated(asset) {
            tracing::debug!(asset = %asset.id, "skipping fully depreciated asset");
            batch.skipped.push(SkippedAsset {
                asset_id: asset.id.clone(),
                reason: FULLY_DEPRECIATED.to_string(),
            });
            continue;
        }

        let amount = calculate_depreciation(asset);
        if amount <= Decimal::ZERO {
            tracing::debug!(asset = %asset.id, "no depreciation computed");
            continue;
        }

        batch.records.push(DepreciationRecord {
            asset_id: asset.id.clone(),
            period_date,
            depreciation_amount: amount,
            book_value_before: asset.book_value,
            book_value_after: calculate_new_book_value(
                asset.book_value,
                amount,
                asset.salvage_value,
            ),
            accumulated_depreciation_after: round2(asset.accumulated_depreciation.saturating_add(amount)),
        });
    }

    tracing::info!(
        period = %period_date,
        records = batch.records.len(),
        skipped = batch.skipped.len(),
        "depreciation batch processed"
    );
    batch
}

/// Sum of depreciation across records, rounded to 2 decimals
pub fn calculate_total_depreciation(records: &[DepreciationRecord]) -> Decimal {
    round2(
        records
            .iter()
            .fold(Decimal::ZERO, |total, r| total.saturating_add(r.depreciation_amount)),
    )
}

/// Period key (first of the month) for a date
pub fn get_monthly_period_date(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
}

/// Period key for the current local month
pub fn current_period_date() -> NaiveDate {
    get_monthly_period_date(today())
}

/// Project the month-by-month schedule from the asset's current book value
///
/// Stops early once the asset is fully depreciated or no further depreciation
/// can be computed.
pub fn project_depreciation_schedule(
    asset: &DepreciableAsset,
    start: NaiveDate,
    months: u32,
) -> Vec<ScheduleEntry> {
    let first_period = first_of_month(start);
    let mut current = asset.clone();
    let mut schedule = Vec::new();

    for period in 1..=months {
        if is_fully_depreciated(&current) {
            break;
        }
        let amount = calculate_depreciation(&current);
        if amount <= Decimal::ZERO {
            break;
        }
        let Some(period_date) = first_period.checked_add_months(Months::new(period - 1)) else {
            break;
        };

        let closing = calculate_new_book_value(current.book_value, amount, current.salvage_value);
        schedule.push(ScheduleEntry {
            period,
            period_date,
            opening_book_value: current.book_value,
            depreciation_amount: amount,
            closing_book_value: closing,
        });

        current.accumulated_depreciation = current.accumulated_depreciation.saturating_add(amount);
        current.book_value = closing;
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::parse_iso_date;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn straight_line(cost: Decimal, salvage: Decimal, life: i32) -> DepreciableAsset {
        DepreciableAsset::new("AST-1", cost, salvage, life, DepreciationMethod::StraightLine)
    }

    fn declining(cost: Decimal, salvage: Decimal, life: i32) -> DepreciableAsset {
        DepreciableAsset::new("AST-2", cost, salvage, life, DepreciationMethod::DecliningBalance)
    }

    #[test]
    fn test_straight_line() {
        let asset = straight_line(dec!(120000), dec!(12000), 60);
        // (120000 - 12000) / 60 = 1800
        assert_eq!(calculate_depreciation(&asset), dec!(1800));
    }

    #[test]
    fn test_straight_line_rounds_half_away_from_zero() {
        // 1000 / 3 = 333.333...
        let asset = straight_line(dec!(1000), dec!(0), 3);
        assert_eq!(calculate_depreciation(&asset), dec!(333.33));

        // 100.05 / 2 = 50.025
        let asset = straight_line(dec!(100.05), dec!(0), 2);
        assert_eq!(calculate_depreciation(&asset), dec!(50.03));
    }

    #[test]
    fn test_declining_balance_uses_book_value() {
        let asset = declining(dec!(100000), dec!(10000), 24).with_book_value(dec!(60000));
        // 60000 * 2 / 24 = 5000
        assert_eq!(calculate_depreciation(&asset), dec!(5000));
    }

    #[test]
    fn test_capped_at_salvage() {
        let asset = straight_line(dec!(12000), dec!(2000), 10).with_book_value(dec!(2400));
        // Formula gives 1000, only 400 left above salvage
        assert_eq!(calculate_depreciation(&asset), dec!(400));

        let asset = declining(dec!(50000), dec!(5000), 4).with_book_value(dec!(6000));
        // 6000 * 0.5 = 3000, capped at 1000
        assert_eq!(calculate_depreciation(&asset), dec!(1000));
    }

    #[test]
    fn test_zero_or_negative_life_returns_zero() {
        assert_eq!(calculate_depreciation(&straight_line(dec!(1000), dec!(0), 0)), Decimal::ZERO);
        assert_eq!(calculate_depreciation(&declining(dec!(1000), dec!(0), -12)), Decimal::ZERO);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let asset = declining(Decimal::MAX, dec!(0), 1);
        assert_eq!(calculate_depreciation(&asset), Decimal::MAX);
        assert_eq!(calculate_depreciation_result(&asset).new_book_value, Decimal::ZERO);

        let asset = straight_line(Decimal::MAX, -Decimal::MAX, 1);
        assert_eq!(calculate_depreciation(&asset), Decimal::MAX);

        let assets = vec![declining(Decimal::MAX, dec!(0), 1), declining(Decimal::MAX, dec!(0), 1)];
        let batch = process_depreciation_batch(&assets, date("2024-01-01"));
        assert_eq!(batch.records.len(), 2);
        assert_eq!(calculate_total_depreciation(&batch.records), Decimal::MAX);

        let schedule = project_depreciation_schedule(&assets[0], date("2024-01-01"), 3);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].closing_book_value, Decimal::ZERO);
    }

    #[test]
    fn test_fully_depreciated() {
        let asset = straight_line(dec!(10000), dec!(1000), 12).with_book_value(dec!(1000));
        assert!(is_fully_depreciated(&asset));
        assert_eq!(calculate_depreciation(&asset), Decimal::ZERO);

        let result = calculate_depreciation_result(&asset);
        assert_eq!(result.depreciation_amount, Decimal::ZERO);
        assert_eq!(result.new_book_value, dec!(1000));
    }

    #[test]
    fn test_new_book_value() {
        assert_eq!(calculate_new_book_value(dec!(5000), dec!(1200), dec!(500)), dec!(3800));
        assert_eq!(calculate_new_book_value(dec!(1000), dec!(800), dec!(500)), dec!(500));
        assert_eq!(calculate_new_book_value(dec!(100.005), dec!(0), dec!(0)), dec!(100.01));
    }

    #[test]
    fn test_validate_inputs() {
        let ok = straight_line(dec!(1000), dec!(100), 12);
        assert!(validate_depreciation_inputs(&ok).valid);

        let negative = straight_line(dec!(-1), dec!(0), 12);
        let result = validate_depreciation_inputs(&negative);
        assert!(!result.valid);
        assert!(result.error.unwrap().starts_with("Purchase cost"));

        let salvage = straight_line(dec!(1000), dec!(1001), 12);
        let result = validate_depreciation_inputs(&salvage);
        assert!(!result.valid);
        assert!(result.error.unwrap().starts_with("Salvage value"));
    }

    #[test]
    fn test_batch_partitions_assets() {
        let period = date("2024-03-01");
        let active = straight_line(dec!(12000), dec!(0), 12);
        let done = DepreciableAsset {
            id: "AST-DONE".to_string(),
            ..straight_line(dec!(5000), dec!(500), 12).with_book_value(dec!(500))
        };
        let no_life = DepreciableAsset {
            id: "AST-NOLIFE".to_string(),
            ..straight_line(dec!(5000), dec!(0), 0)
        };

        let batch = process_depreciation_batch(&[active, done, no_life], period);

        assert_eq!(batch.records.len(), 1);
        let record = &batch.records[0];
        assert_eq!(record.asset_id, "AST-1");
        assert_eq!(record.period_date, period);
        assert_eq!(record.depreciation_amount, dec!(1000));
        assert_eq!(record.book_value_before, dec!(12000));
        assert_eq!(record.book_value_after, dec!(11000));
        assert_eq!(record.accumulated_depreciation_after, dec!(1000));

        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].asset_id, "AST-DONE");
        assert_eq!(batch.skipped[0].reason, FULLY_DEPRECIATED);
    }

    #[test]
    fn test_batch_all_fully_depreciated() {
        let assets: Vec<_> = (0..4)
            .map(|i| DepreciableAsset {
                id: format!("AST-{}", i),
                ..straight_line(dec!(1000), dec!(100), 12).with_book_value(dec!(100))
            })
            .collect();

        let batch = process_depreciation_batch(&assets, date("2024-01-01"));
        assert!(batch.records.is_empty());
        assert_eq!(batch.skipped.len(), 4);
        assert!(batch.skipped.iter().all(|s| s.reason == "Fully depreciated"));
    }

    #[test]
    fn test_total_depreciation() {
        let assets = vec![
            straight_line(dec!(1000), dec!(0), 3),
            straight_line(dec!(2000), dec!(0), 3),
        ];
        let batch = process_depreciation_batch(&assets, date("2024-01-01"));
        // 333.33 + 666.67
        assert_eq!(calculate_total_depreciation(&batch.records), dec!(1000.00));
        assert_eq!(calculate_total_depreciation(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_period_date() {
        assert_eq!(get_monthly_period_date(date("2024-02-29")), date("2024-02-01"));
        assert_eq!(get_monthly_period_date(date("2025-12-31")), date("2025-12-01"));
        assert_eq!(current_period_date().format("%d").to_string(), "01");
    }

    #[test]
    fn test_schedule_straight_line_reaches_salvage() {
        let asset = straight_line(dec!(1300), dec!(100), 12);
        let schedule = project_depreciation_schedule(&asset, date("2024-11-15"), 24);

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].period_date, date("2024-11-01"));
        assert_eq!(schedule[2].period_date, date("2025-01-01"));
        assert_eq!(schedule[0].depreciation_amount, dec!(100));
        assert_eq!(schedule.last().unwrap().closing_book_value, dec!(100));
        for pair in schedule.windows(2) {
            assert_eq!(pair[0].closing_book_value, pair[1].opening_book_value);
        }
    }

    #[test]
    fn test_schedule_declining_never_below_salvage() {
        let asset = declining(dec!(10000), dec!(1500), 6);
        let schedule = project_depreciation_schedule(&asset, date("2024-01-01"), 60);

        assert!(!schedule.is_empty());
        assert!(schedule.iter().all(|e| e.closing_book_value >= dec!(1500)));
        // First month: 10000 * 2 / 6 = 3333.33
        assert_eq!(schedule[0].depreciation_amount, dec!(3333.33));
    }
}
