//! Error types shared by the calculators

use thiserror::Error;

/// Errors raised while turning raw caller input into typed records
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

impl CalcError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        CalcError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
