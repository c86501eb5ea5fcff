//! Input file loading
//!
//! Record files are YAML; JSON input works as well since serde_yml accepts
//! it as a subset.

pub mod diagnostics;

use serde::de::DeserializeOwned;
use std::path::Path;

pub use diagnostics::{YamlError, YamlSyntaxError};

/// Parse records from an in-memory document
pub fn parse_yaml_str<T: DeserializeOwned>(source: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(source)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, source, filename).into())
}

/// Read and parse a record file
pub fn parse_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, YamlError> {
    let source = std::fs::read_to_string(path).map_err(|source| YamlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if source.trim().is_empty() {
        return Err(YamlError::Empty {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), bytes = source.len(), "parsing input file");
    parse_yaml_str(&source, &path.display().to_string())
}
