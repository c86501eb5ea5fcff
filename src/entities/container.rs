//! Container tracking records for free-time and storage charges

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::CalcError;
use crate::entities::fee::DocumentType;

/// Where a container is in its port lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerStatus {
    #[default]
    AtPort,
    GateOut,
    Delivered,
    Returned,
}

impl ContainerStatus {
    pub const ALL: [ContainerStatus; 4] = [
        ContainerStatus::AtPort,
        ContainerStatus::GateOut,
        ContainerStatus::Delivered,
        ContainerStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::AtPort => "at_port",
            ContainerStatus::GateOut => "gate_out",
            ContainerStatus::Delivered => "delivered",
            ContainerStatus::Returned => "returned",
        }
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContainerStatus {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ContainerStatus::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| CalcError::unknown("container status", s))
    }
}

/// Urgency of a container's free-time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreeTimeStatus {
    /// More than the warning window remains (or no free time recorded)
    Ok,
    /// Expires within the warning window
    Warning,
    /// Free time already expired, storage is accruing
    Critical,
}

impl std::fmt::Display for FreeTimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreeTimeStatus::Ok => write!(f, "ok"),
            FreeTimeStatus::Warning => write!(f, "warning"),
            FreeTimeStatus::Critical => write!(f, "critical"),
        }
    }
}

/// A container tracked against a customs declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerTracking {
    /// ISO 6346 container number (e.g. MSCU1234567)
    pub container_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pib_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peb_id: Option<String>,

    pub arrival_date: NaiveDate,

    /// Days at the terminal before storage accrues
    #[serde(default)]
    pub free_time_days: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_out_date: Option<NaiveDate>,

    /// Storage charge per day once free time has expired
    #[serde(default)]
    pub daily_rate: Decimal,

    #[serde(default)]
    pub status: ContainerStatus,
}

/// Container form as submitted, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerForm {
    pub container_number: Option<String>,
    pub document_type: Option<String>,
    pub pib_id: Option<String>,
    pub peb_id: Option<String>,
    pub arrival_date: Option<String>,
    pub free_time_days: Option<i64>,
    pub gate_out_date: Option<String>,
    pub daily_rate: Option<f64>,
    pub status: Option<String>,
}

/// Derived storage position for one container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerStorageSummary {
    pub container_number: String,
    pub free_time_end: NaiveDate,
    pub storage_days: i64,
    pub storage_fee: Decimal,
    pub free_time_status: FreeTimeStatus,
}
