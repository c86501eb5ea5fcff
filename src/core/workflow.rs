//! Workflow guard for engineering assessment status transitions
//!
//! Lifting plans and transport assessments move through a fixed review
//! workflow. Only the transitions in the adjacency table are allowed; anything
//! else is rejected rather than applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::CalcError;

/// Review status of an engineering assessment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    #[default]
    Draft,
    InProgress,
    PendingReview,
    Approved,
    Rejected,
    Superseded,
}

impl AssessmentStatus {
    pub const ALL: [AssessmentStatus; 6] = [
        AssessmentStatus::Draft,
        AssessmentStatus::InProgress,
        AssessmentStatus::PendingReview,
        AssessmentStatus::Approved,
        AssessmentStatus::Rejected,
        AssessmentStatus::Superseded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Draft => "draft",
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::PendingReview => "pending_review",
            AssessmentStatus::Approved => "approved",
            AssessmentStatus::Rejected => "rejected",
            AssessmentStatus::Superseded => "superseded",
        }
    }

    /// Terminal statuses have no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        allowed_transitions(*self).is_empty()
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssessmentStatus {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(AssessmentStatus::Draft),
            "in_progress" => Ok(AssessmentStatus::InProgress),
            "pending_review" => Ok(AssessmentStatus::PendingReview),
            "approved" => Ok(AssessmentStatus::Approved),
            "rejected" => Ok(AssessmentStatus::Rejected),
            "superseded" => Ok(AssessmentStatus::Superseded),
            _ => Err(CalcError::unknown("assessment status", s)),
        }
    }
}

/// Errors that can occur during workflow operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Invalid status transition: {from} → {to}")]
    InvalidTransition {
        from: AssessmentStatus,
        to: AssessmentStatus,
    },

    #[error("Assessment is already {0}")]
    Unchanged(AssessmentStatus),
}

/// Get allowed transitions from the current status
pub fn allowed_transitions(current: AssessmentStatus) -> &'static [AssessmentStatus] {
    use self::AssessmentStatus::*;
    match current {
        Draft => &[InProgress, PendingReview],
        InProgress => &[PendingReview, Draft],
        PendingReview => &[Approved, Rejected],
        Rejected => &[Draft],
        Approved => &[Superseded],
        Superseded => &[],
    }
}

/// Check if a status transition is valid
pub fn can_transition_to(current: AssessmentStatus, target: AssessmentStatus) -> bool {
    allowed_transitions(current).contains(&target)
}

/// Apply a transition, returning the new status or the reason it was refused
pub fn transition(
    current: AssessmentStatus,
    target: AssessmentStatus,
) -> Result<AssessmentStatus, WorkflowError> {
    if current == target {
        return Err(WorkflowError::Unchanged(current));
    }
    if !can_transition_to(current, target) {
        tracing::debug!(%current, %target, "rejected status transition");
        return Err(WorkflowError::InvalidTransition {
            from: current,
            to: target,
        });
    }
    Ok(target)
}
