//! Core module - shared types and utilities used by the calculators

pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod money;
pub mod validation;
pub mod workflow;

pub use config::Config;
pub use error::CalcError;
pub use validation::{FieldError, FormValidation, ValidationResult};
pub use workflow::{AssessmentStatus, WorkflowError};
