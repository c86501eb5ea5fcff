//! Heavy-cargo transport configurations and per-axle loads

use serde::{Deserialize, Serialize};

use crate::core::error::CalcError;
use crate::core::workflow::AssessmentStatus;

/// Regulatory limit for a single axle, tons
pub const SINGLE_AXLE_LIMIT_TONS: f64 = 10.0;

/// Regulatory limit for a tandem axle group, tons
pub const TANDEM_AXLE_LIMIT_TONS: f64 = 18.0;

/// Regulatory limit for a tridem axle group, tons
pub const TRIDEM_AXLE_LIMIT_TONS: f64 = 24.0;

/// Axle configuration class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxleType {
    Single,
    Tandem,
    Tridem,
}

impl AxleType {
    /// Maximum legal load for this axle type
    pub fn max_load_tons(&self) -> f64 {
        match self {
            AxleType::Single => SINGLE_AXLE_LIMIT_TONS,
            AxleType::Tandem => TANDEM_AXLE_LIMIT_TONS,
            AxleType::Tridem => TRIDEM_AXLE_LIMIT_TONS,
        }
    }
}

impl std::fmt::Display for AxleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxleType::Single => write!(f, "single"),
            AxleType::Tandem => write!(f, "tandem"),
            AxleType::Tridem => write!(f, "tridem"),
        }
    }
}

impl std::str::FromStr for AxleType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(AxleType::Single),
            "tandem" => Ok(AxleType::Tandem),
            "tridem" => Ok(AxleType::Tridem),
            _ => Err(CalcError::unknown("axle type", s)),
        }
    }
}

/// Which unit of the combination an axle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxleGroup {
    PrimeMover,
    Trailer,
}

impl std::fmt::Display for AxleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxleGroup::PrimeMover => write!(f, "prime_mover"),
            AxleGroup::Trailer => write!(f, "trailer"),
        }
    }
}

/// Prime mover and trailer combination carrying a cargo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub cargo_weight_tons: f64,

    #[serde(default)]
    pub trailer_tare_tons: f64,

    #[serde(default)]
    pub prime_mover_weight_tons: f64,

    #[serde(default)]
    pub prime_mover_axles: u32,

    #[serde(default)]
    pub trailer_axles: u32,

    /// Cargo centre of gravity from the trailer front, m (not used by the
    /// uniform distribution model)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cog_longitudinal_m: Option<f64>,

    /// Cargo centre of gravity height above deck, m (not used by the
    /// uniform distribution model)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cog_height_m: Option<f64>,

    #[serde(default)]
    pub status: AssessmentStatus,
}

impl TransportConfiguration {
    pub fn new(
        cargo_weight_tons: f64,
        trailer_tare_tons: f64,
        prime_mover_weight_tons: f64,
        prime_mover_axles: u32,
        trailer_axles: u32,
    ) -> Self {
        Self {
            id: None,
            cargo_weight_tons,
            trailer_tare_tons,
            prime_mover_weight_tons,
            prime_mover_axles,
            trailer_axles,
            cog_longitudinal_m: None,
            cog_height_m: None,
            status: AssessmentStatus::default(),
        }
    }

    /// Gross combination weight
    pub fn gross_weight_tons(&self) -> f64 {
        self.cargo_weight_tons + self.trailer_tare_tons + self.prime_mover_weight_tons
    }
}

/// Load on one axle against its legal limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxleLoadResult {
    /// 1-based position along the combination, prime mover first
    pub axle_number: u32,
    pub group: AxleGroup,
    pub axle_type: AxleType,
    pub load_tons: f64,
    pub max_allowed_tons: f64,
    pub utilization_pct: f64,
}

impl AxleLoadResult {
    pub fn is_overloaded(&self) -> bool {
        self.load_tons > self.max_allowed_tons
    }
}

/// Whole-combination view of an axle load calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxleLoadSummary {
    pub axle_count: usize,
    pub total_load_tons: f64,
    pub max_utilization_pct: f64,
    pub overloaded_axles: Vec<u32>,
    pub permit_required: bool,
}
