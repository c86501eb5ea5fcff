//! Calculation layer
//!
//! Pure functions over plain records. None of the calculators depend on each
//! other, and none of them touch the filesystem or a clock except where a
//! `today`/`current_period_date` helper is named as such.

pub mod depreciation;
pub mod fees;
pub mod loads;
pub mod reports;
pub mod storage;
