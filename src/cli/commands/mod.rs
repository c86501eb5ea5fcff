//! CLI command implementations

pub mod depreciate;
pub mod fees;
pub mod load;
pub mod report;
pub mod storage;
pub mod workflow;

use miette::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a record file, surfacing parse failures as source diagnostics
pub(crate) fn read_records<T: DeserializeOwned>(path: &Path) -> Result<T> {
    Ok(crate::yaml::parse_yaml_file(path)?)
}
