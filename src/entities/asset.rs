//! Fixed asset records for depreciation runs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::CalcError;

/// How an asset loses value each period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// Equal amount every month over the useful life
    #[default]
    StraightLine,
    /// Double-declining: a fixed rate applied to the remaining book value
    DecliningBalance,
}

impl DepreciationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepreciationMethod::StraightLine => "straight_line",
            DepreciationMethod::DecliningBalance => "declining_balance",
        }
    }
}

impl std::fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DepreciationMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "straight_line" => Ok(DepreciationMethod::StraightLine),
            "declining_balance" => Ok(DepreciationMethod::DecliningBalance),
            _ => Err(CalcError::unknown("depreciation method", s)),
        }
    }
}

/// A fixed asset as currently recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciableAsset {
    /// Asset identifier (asset register code)
    pub id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Original acquisition cost
    pub purchase_cost: Decimal,

    /// Residual value at end of useful life
    #[serde(default)]
    pub salvage_value: Decimal,

    /// Current book value
    pub book_value: Decimal,

    /// Depreciation booked so far
    #[serde(default)]
    pub accumulated_depreciation: Decimal,

    /// Useful life in months
    pub useful_life_months: i32,

    #[serde(default)]
    pub depreciation_method: DepreciationMethod,
}

impl DepreciableAsset {
    /// Create a newly acquired asset (book value equals cost)
    pub fn new(
        id: impl Into<String>,
        purchase_cost: Decimal,
        salvage_value: Decimal,
        useful_life_months: i32,
        depreciation_method: DepreciationMethod,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            purchase_cost,
            salvage_value,
            book_value: purchase_cost,
            accumulated_depreciation: Decimal::ZERO,
            useful_life_months,
            depreciation_method,
        }
    }

    /// Same asset with a different current book value
    pub fn with_book_value(mut self, book_value: Decimal) -> Self {
        self.accumulated_depreciation = self.purchase_cost.saturating_sub(book_value);
        self.book_value = book_value;
        self
    }

    /// Value still available to depreciate (never negative)
    pub fn depreciable_remaining(&self) -> Decimal {
        self.book_value.saturating_sub(self.salvage_value).max(Decimal::ZERO)
    }
}

/// Depreciation for one asset and one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationResult {
    pub depreciation_amount: Decimal,
    pub new_book_value: Decimal,
}

/// Depreciation posted for an asset in a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationRecord {
    pub asset_id: String,
    pub period_date: NaiveDate,
    pub depreciation_amount: Decimal,
    pub book_value_before: Decimal,
    pub book_value_after: Decimal,
    pub accumulated_depreciation_after: Decimal,
}

/// An asset left out of a depreciation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAsset {
    pub asset_id: String,
    pub reason: String,
}

/// Outcome of a monthly depreciation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepreciationBatch {
    pub records: Vec<DepreciationRecord>,
    pub skipped: Vec<SkippedAsset>,
}

/// One projected month of an asset's depreciation schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month number within the projection
    pub period: u32,
    pub period_date: NaiveDate,
    pub opening_book_value: Decimal,
    pub depreciation_amount: Decimal,
    pub closing_book_value: Decimal,
}
