//! Crane lifting plans

use serde::{Deserialize, Serialize};

use crate::core::workflow::AssessmentStatus;

/// A planned crane lift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftingPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Weight of the load itself
    pub load_weight_tons: f64,

    /// Slings, shackles, spreader bar and hook block
    #[serde(default)]
    pub rigging_weight_tons: f64,

    /// Rated capacity from the load chart at the working radius
    pub crane_capacity_at_radius_tons: f64,

    /// Bearing area of the outrigger pads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outrigger_area_m2: Option<f64>,

    #[serde(default)]
    pub status: AssessmentStatus,
}

impl LiftingPlan {
    pub fn new(load_weight_tons: f64, rigging_weight_tons: f64, capacity_tons: f64) -> Self {
        Self {
            id: None,
            load_weight_tons,
            rigging_weight_tons,
            crane_capacity_at_radius_tons: capacity_tons,
            outrigger_area_m2: None,
            status: AssessmentStatus::default(),
        }
    }

    /// Load plus rigging
    pub fn total_lifted_weight(&self) -> f64 {
        self.load_weight_tons + self.rigging_weight_tons
    }
}

/// Derived figures for a lifting plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftAssessment {
    pub total_lifted_tons: f64,
    pub utilization_pct: f64,
    pub threshold_pct: f64,
    pub safe: bool,

    /// Outrigger ground pressure, when the pad area is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_bearing_kn_m2: Option<f64>,
}
