//! Customs fee records (import PIB / export PEB declarations)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::CalcError;

/// Customs declaration a fee belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Import declaration
    Pib,
    /// Export declaration
    Peb,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pib => "pib",
            DocumentType::Peb => "peb",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pib" => Ok(DocumentType::Pib),
            "peb" => Ok(DocumentType::Peb),
            _ => Err(CalcError::unknown("document type", s)),
        }
    }
}

/// Fee category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeCategory {
    Duty,
    Tax,
    Service,
    Storage,
    Penalty,
    Other,
}

impl FeeCategory {
    pub const ALL: [FeeCategory; 6] = [
        FeeCategory::Duty,
        FeeCategory::Tax,
        FeeCategory::Service,
        FeeCategory::Storage,
        FeeCategory::Penalty,
        FeeCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeCategory::Duty => "duty",
            FeeCategory::Tax => "tax",
            FeeCategory::Service => "service",
            FeeCategory::Storage => "storage",
            FeeCategory::Penalty => "penalty",
            FeeCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for FeeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeeCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        FeeCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| CalcError::unknown("fee category", s))
    }
}

/// Settlement state of a fee
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Waived,
    Cancelled,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Waived,
        PaymentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Waived => "waived",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PaymentStatus::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| CalcError::unknown("payment status", s))
    }
}

fn default_currency() -> String {
    "IDR".to_string()
}

/// A fee charged against a customs declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub id: String,

    pub document_type: DocumentType,

    /// Import declaration reference (set when `document_type` is pib)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pib_id: Option<String>,

    /// Export declaration reference (set when `document_type` is peb)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peb_id: Option<String>,

    pub fee_category: FeeCategory,

    pub amount: Decimal,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FeeRecord {
    /// Create a pending fee against an import declaration
    pub fn for_pib(
        id: impl Into<String>,
        pib_id: impl Into<String>,
        fee_category: FeeCategory,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            document_type: DocumentType::Pib,
            pib_id: Some(pib_id.into()),
            peb_id: None,
            fee_category,
            amount,
            currency: default_currency(),
            payment_status: PaymentStatus::Pending,
            payment_date: None,
            description: None,
        }
    }

    /// Create a pending fee against an export declaration
    pub fn for_peb(
        id: impl Into<String>,
        peb_id: impl Into<String>,
        fee_category: FeeCategory,
        amount: Decimal,
    ) -> Self {
        Self {
            document_type: DocumentType::Peb,
            pib_id: None,
            peb_id: Some(peb_id.into()),
            ..Self::for_pib(id, String::new(), fee_category, amount)
        }
    }

    /// Mark the fee paid on `date`
    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.payment_status = PaymentStatus::Paid;
        self.payment_date = Some(date);
        self
    }

    /// Reference of the linked declaration
    pub fn document_id(&self) -> Option<&str> {
        match self.document_type {
            DocumentType::Pib => self.pib_id.as_deref(),
            DocumentType::Peb => self.peb_id.as_deref(),
        }
    }
}

/// Fee form as submitted, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeForm {
    pub document_type: Option<String>,
    pub pib_id: Option<String>,
    pub peb_id: Option<String>,
    pub fee_category: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub payment_status: Option<String>,
    pub payment_date: Option<String>,
    pub description: Option<String>,
}

/// Equality filters for fee lists; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeFilter {
    pub document_type: Option<DocumentType>,
    pub pib_id: Option<String>,
    pub peb_id: Option<String>,
    pub fee_category: Option<FeeCategory>,
    pub payment_status: Option<PaymentStatus>,
}
