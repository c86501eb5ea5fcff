//! Engineering load calculator
//!
//! Crane-lift utilization, outrigger ground bearing and axle-load
//! distribution for heavy-cargo transport. The axle model splits weight
//! uniformly across each group; it is not a moment balance, so centre of
//! gravity fields on the configuration are ignored.

use crate::core::money::round2_f64;
use crate::core::validation::ValidationResult;
use crate::entities::lifting::{LiftAssessment, LiftingPlan};
use crate::entities::transport::{
    AxleGroup, AxleLoadResult, AxleLoadSummary, AxleType, TransportConfiguration,
};

pub use crate::core::workflow::can_transition_to;

/// Utilization at or below which a lift is considered safe, percent
pub const DEFAULT_UTILIZATION_THRESHOLD_PCT: f64 = 80.0;

/// Standard gravity, kN per tonne
pub const GRAVITY_KN_PER_TON: f64 = 9.81;

/// Most axles a prime mover or trailer may declare
pub const MAX_AXLES_PER_GROUP: u32 = 64;

/// Check the figures a transport configuration must satisfy before axle loads
/// are computed
pub fn validate_transport_configuration(config: &TransportConfiguration) -> ValidationResult {
    if config.prime_mover_axles > MAX_AXLES_PER_GROUP || config.trailer_axles > MAX_AXLES_PER_GROUP {
        return ValidationResult::fail(format!(
            "Axle count cannot exceed {} per group",
            MAX_AXLES_PER_GROUP
        ));
    }
    let weights = [
        config.cargo_weight_tons,
        config.trailer_tare_tons,
        config.prime_mover_weight_tons,
    ];
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return ValidationResult::fail("Weights must be zero or more");
    }
    ValidationResult::ok()
}

/// Per-axle loads for a prime mover and trailer combination
///
/// Prime mover weight is shared by the prime mover axles, cargo plus trailer
/// tare by the trailer axles. Axles are numbered from the front starting at 1.
///
/// A group declaring more than [`MAX_AXLES_PER_GROUP`] axles yields no rows at
/// all; [`validate_transport_configuration`] reports why.
pub fn calculate_axle_loads(config: &TransportConfiguration) -> Vec<AxleLoadResult> {
    if config.prime_mover_axles > MAX_AXLES_PER_GROUP || config.trailer_axles > MAX_AXLES_PER_GROUP {
        tracing::warn!(
            prime_mover_axles = config.prime_mover_axles,
            trailer_axles = config.trailer_axles,
            "axle count out of range, no loads calculated"
        );
        return Vec::new();
    }
    let mut loads = Vec::with_capacity(config.prime_mover_axles as usize + config.trailer_axles as usize);

    if config.prime_mover_axles > 0 {
        let per_axle = config.prime_mover_weight_tons / f64::from(config.prime_mover_axles);
        for position in 1..=config.prime_mover_axles {
            let axle_type = if position == 1 {
                AxleType::Single
            } else {
                AxleType::Tandem
            };
            loads.push(axle_load(position, AxleGroup::PrimeMover, axle_type, per_axle));
        }
    }

    if config.trailer_axles > 0 {
        let per_axle =
            (config.cargo_weight_tons + config.trailer_tare_tons) / f64::from(config.trailer_axles);
        let axle_type = if config.trailer_axles >= 3 {
            AxleType::Tridem
        } else {
            AxleType::Tandem
        };
        for position in 1..=config.trailer_axles {
            loads.push(axle_load(
                config.prime_mover_axles.saturating_add(position),
                AxleGroup::Trailer,
                axle_type,
                per_axle,
            ));
        }
    }

    tracing::debug!(
        axles = loads.len(),
        gross = config.gross_weight_tons(),
        "calculated axle loads"
    );
    loads
}

fn axle_load(axle_number: u32, group: AxleGroup, axle_type: AxleType, load_tons: f64) -> AxleLoadResult {
    let max_allowed_tons = axle_type.max_load_tons();
    AxleLoadResult {
        axle_number,
        group,
        axle_type,
        load_tons,
        max_allowed_tons,
        utilization_pct: calculate_utilization_percentage(load_tons, max_allowed_tons),
    }
}

/// True when no axle exceeds its legal maximum
pub fn is_within_legal_limits(loads: &[AxleLoadResult]) -> bool {
    !loads.iter().any(AxleLoadResult::is_overloaded)
}

/// True when any axle exceeds its legal maximum
pub fn determine_permit_required(loads: &[AxleLoadResult]) -> bool {
    !is_within_legal_limits(loads)
}

/// Total lifted weight as a percentage of rated capacity; 0 when the capacity
/// is not positive
pub fn calculate_utilization_percentage(total_lifted: f64, capacity: f64) -> f64 {
    if capacity <= 0.0 {
        return 0.0;
    }
    round2_f64(total_lifted / capacity * 100.0)
}

/// Safe when utilization does not exceed the threshold
pub fn is_utilization_safe(utilization_pct: f64, threshold_pct: f64) -> bool {
    utilization_pct <= threshold_pct
}

/// Ground pressure under the outriggers in kN/m²; 0 when the area is not
/// positive
pub fn calculate_ground_bearing(total_tons: f64, area_m2: f64) -> f64 {
    if area_m2 <= 0.0 {
        return 0.0;
    }
    round2_f64(total_tons * GRAVITY_KN_PER_TON / area_m2)
}

/// Utilization, safety verdict and ground bearing for a lifting plan
pub fn assess_lift(plan: &LiftingPlan, threshold_pct: f64) -> LiftAssessment {
    let total = plan.total_lifted_weight();
    let utilization_pct = calculate_utilization_percentage(total, plan.crane_capacity_at_radius_tons);
    let safe = is_utilization_safe(utilization_pct, threshold_pct);

    if !safe {
        tracing::warn!(
            plan = plan.id.as_deref().unwrap_or("-"),
            utilization_pct,
            threshold_pct,
            "lift exceeds utilization threshold"
        );
    }

    LiftAssessment {
        total_lifted_tons: round2_f64(total),
        utilization_pct,
        threshold_pct,
        safe,
        ground_bearing_kn_m2: plan
            .outrigger_area_m2
            .map(|area| calculate_ground_bearing(total, area)),
    }
}

/// Totals and permit verdict over a set of axle loads
pub fn summarize_axle_loads(loads: &[AxleLoadResult]) -> AxleLoadSummary {
    AxleLoadSummary {
        axle_count: loads.len(),
        total_load_tons: round2_f64(loads.iter().map(|l| l.load_tons).sum()),
        max_utilization_pct: loads
            .iter()
            .map(|l| l.utilization_pct)
            .fold(0.0, f64::max),
        overloaded_axles: loads
            .iter()
            .filter(|l| l.is_overloaded())
            .map(|l| l.axle_number)
            .collect(),
        permit_required: determine_permit_required(loads),
    }
}
