//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::calc::loads::DEFAULT_UTILIZATION_THRESHOLD_PCT;
use crate::calc::reports::SLOW_PAYER_THRESHOLD_DAYS;
use crate::calc::storage::FREE_TIME_WARNING_DAYS;

/// Name of the per-directory config file
pub const PROJECT_CONFIG_FILE: &str = ".fcore.yaml";

/// Calculator tunables with layered hierarchy
///
/// Every field is optional in a config file; unset fields fall through to the
/// next layer and finally to the built-in defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Average days-to-pay above which a customer is a slow payer
    pub slow_payer_days: Option<f64>,

    /// Crane utilization percentage considered safe (inclusive)
    pub utilization_threshold: Option<f64>,

    /// Days before free-time expiry at which a container is flagged
    pub free_time_warning_days: Option<i64>,

    /// Default output format for commands
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (resolved in the accessors)

        // 2. Global user config (~/.config/fcore/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config in the working directory
        if let Some(project) = Self::read_file(Path::new(PROJECT_CONFIG_FILE)) {
            config.merge(project);
        }

        // 4. File named on the command line
        if let Some(path) = explicit {
            match Self::read_file(path) {
                Some(file) => config.merge(file),
                None => tracing::warn!(path = %path.display(), "config file could not be read"),
            }
        }

        // 5. Environment variables
        config.apply_env();

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fcore")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    fn apply_env(&mut self) {
        if let Some(days) = env_parse::<f64>("FCORE_SLOW_PAYER_DAYS") {
            self.slow_payer_days = Some(days);
        }
        if let Some(pct) = env_parse::<f64>("FCORE_UTILIZATION_THRESHOLD") {
            self.utilization_threshold = Some(pct);
        }
        if let Some(days) = env_parse::<i64>("FCORE_FREE_TIME_WARNING_DAYS") {
            self.free_time_warning_days = Some(days);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.slow_payer_days.is_some() {
            self.slow_payer_days = other.slow_payer_days;
        }
        if other.utilization_threshold.is_some() {
            self.utilization_threshold = other.utilization_threshold;
        }
        if other.free_time_warning_days.is_some() {
            self.free_time_warning_days = other.free_time_warning_days;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    pub fn slow_payer_days(&self) -> f64 {
        self.slow_payer_days.unwrap_or(SLOW_PAYER_THRESHOLD_DAYS)
    }

    pub fn utilization_threshold(&self) -> f64 {
        self.utilization_threshold
            .unwrap_or(DEFAULT_UTILIZATION_THRESHOLD_PCT)
    }

    pub fn free_time_warning_days(&self) -> i64 {
        self.free_time_warning_days.unwrap_or(FREE_TIME_WARNING_DAYS)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
