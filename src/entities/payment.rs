//! Invoice payment rows used by the payment dashboards

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One invoice and what has been paid against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayment {
    pub customer_id: String,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,

    pub invoiced: Decimal,

    #[serde(default)]
    pub paid: Decimal,

    /// Days between invoice and settlement, once settled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_to_pay: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl CustomerPayment {
    pub fn outstanding(&self) -> Decimal {
        self.invoiced.saturating_sub(self.paid)
    }
}

/// Per-customer payment roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPaymentSummary {
    pub customer_id: String,
    pub customer_name: String,
    pub invoice_count: usize,
    pub total_invoiced: Decimal,
    pub total_paid: Decimal,
    pub outstanding: Decimal,

    /// Mean days-to-pay over this customer's settled invoices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_days_to_pay: Option<f64>,
}

/// Age band of an outstanding amount relative to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    Current,
    Days1To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 5] = [
        AgingBucket::Current,
        AgingBucket::Days1To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    /// Bucket for a number of days past due (zero or negative is current)
    pub fn for_days_overdue(days: i64) -> Self {
        match days {
            i64::MIN..=0 => AgingBucket::Current,
            1..=30 => AgingBucket::Days1To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Current => "current",
            AgingBucket::Days1To30 => "1-30",
            AgingBucket::Days31To60 => "31-60",
            AgingBucket::Days61To90 => "61-90",
            AgingBucket::Over90 => "90+",
        }
    }
}

impl std::fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outstanding totals per aging bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgingSummary {
    pub current: Decimal,
    pub days_1_30: Decimal,
    pub days_31_60: Decimal,
    pub days_61_90: Decimal,
    pub over_90: Decimal,
}

impl AgingSummary {
    pub fn get(&self, bucket: AgingBucket) -> Decimal {
        match bucket {
            AgingBucket::Current => self.current,
            AgingBucket::Days1To30 => self.days_1_30,
            AgingBucket::Days31To60 => self.days_31_60,
            AgingBucket::Days61To90 => self.days_61_90,
            AgingBucket::Over90 => self.over_90,
        }
    }

    pub fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        let slot = match bucket {
            AgingBucket::Current => &mut self.current,
            AgingBucket::Days1To30 => &mut self.days_1_30,
            AgingBucket::Days31To60 => &mut self.days_31_60,
            AgingBucket::Days61To90 => &mut self.days_61_90,
            AgingBucket::Over90 => &mut self.over_90,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> Decimal {
        AgingBucket::ALL
            .iter()
            .fold(Decimal::ZERO, |total, b| total.saturating_add(self.get(*b)))
    }
}
