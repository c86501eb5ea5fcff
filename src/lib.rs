//! fcore: freight ERP calculation core
//!
//! Depreciation, fee and storage aggregation, dashboard report roll-ups and
//! engineering load checks, exposed as plain functions over serde records and
//! through the `fcore` command line tool.

pub mod calc;
pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;
