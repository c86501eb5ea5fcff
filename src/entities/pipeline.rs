//! Quotation / job-order pipeline rows for dashboard status counts

use serde::{Deserialize, Serialize};

use crate::core::error::CalcError;

/// Nominal status of a pipeline record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Draft,
    PendingApproval,
    Approved,
    Rejected,
}

impl std::str::FromStr for PipelineStatus {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(PipelineStatus::Draft),
            "pending_approval" => Ok(PipelineStatus::PendingApproval),
            "approved" => Ok(PipelineStatus::Approved),
            "rejected" => Ok(PipelineStatus::Rejected),
            _ => Err(CalcError::unknown("pipeline status", s)),
        }
    }
}

/// Status bucket used in counts: the nominal statuses plus `converted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
    Converted,
}

impl PipelineStage {
    /// Every stage, in dashboard order
    pub const ALL: [PipelineStage; 5] = [
        PipelineStage::Draft,
        PipelineStage::PendingApproval,
        PipelineStage::Approved,
        PipelineStage::Rejected,
        PipelineStage::Converted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Draft => "draft",
            PipelineStage::PendingApproval => "pending_approval",
            PipelineStage::Approved => "approved",
            PipelineStage::Rejected => "rejected",
            PipelineStage::Converted => "converted",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PipelineStatus> for PipelineStage {
    fn from(status: PipelineStatus) -> Self {
        match status {
            PipelineStatus::Draft => PipelineStage::Draft,
            PipelineStatus::PendingApproval => PipelineStage::PendingApproval,
            PipelineStatus::Approved => PipelineStage::Approved,
            PipelineStatus::Rejected => PipelineStage::Rejected,
        }
    }
}

/// A quotation or proforma job order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRecord {
    pub id: String,

    #[serde(default)]
    pub status: PipelineStatus,

    /// Set once the record has been turned into a job order
    #[serde(default)]
    pub converted: bool,
}

impl PipelineRecord {
    pub fn new(id: impl Into<String>, status: PipelineStatus) -> Self {
        Self {
            id: id.into(),
            status,
            converted: false,
        }
    }

    pub fn converted(mut self) -> Self {
        self.converted = true;
        self
    }

    /// Stage this record is counted under
    pub fn stage(&self) -> PipelineStage {
        if self.converted {
            PipelineStage::Converted
        } else {
            self.status.into()
        }
    }
}

/// Count and share of one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: PipelineStage,
    pub count: usize,
    pub percentage: f64,
}
