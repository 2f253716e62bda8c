//! Reconciliation configuration
//!
//! Loaded from JSON; every field is optional and falls back to its default.

use std::path::Path;

use fxrecon_matching::{DEFAULT_EPSILON, MatcherConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest offset a business day may sit away from UTC
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// How unmatched inventory is treated across day boundaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryPolicy {
    /// Queues reset at each day boundary
    #[default]
    PerPeriod,
    /// Each day's remaining entries open the next day's queues
    Carryover,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Matcher zero threshold
    pub epsilon: f64,
    /// Offset used to map timestamps onto business days
    pub business_utc_offset_minutes: i32,
    pub inventory_policy: InventoryPolicy,
    /// Upper bound on the day-by-day fan-out, `None` for no limit
    pub max_range_days: Option<u64>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            business_utc_offset_minutes: 0,
            inventory_policy: InventoryPolicy::PerPeriod,
            max_range_days: Some(366),
        }
    }
}

impl ReconcileConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be a finite non-negative number, got {}",
                self.epsilon
            )));
        }
        if self.business_utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "business_utc_offset_minutes out of range: {}",
                self.business_utc_offset_minutes
            )));
        }
        if self.max_range_days == Some(0) {
            return Err(ConfigError::Invalid(
                "max_range_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            epsilon: self.epsilon,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = ReconcileConfig::from_json("{}").unwrap();
        assert_eq!(config, ReconcileConfig::default());
        assert_eq!(config.matcher_config().epsilon, DEFAULT_EPSILON);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "epsilon": 0.01,
            "business_utc_offset_minutes": 390,
            "inventory_policy": "carryover",
            "max_range_days": 31
        }"#;
        let config = ReconcileConfig::from_json(json).unwrap();

        assert_eq!(config.epsilon, 0.01);
        assert_eq!(config.business_utc_offset_minutes, 390);
        assert_eq!(config.inventory_policy, InventoryPolicy::Carryover);
        assert_eq!(config.max_range_days, Some(31));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ReconcileConfig::from_json(r#"{"epsilon": -1.0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ReconcileConfig::from_json(r#"{"business_utc_offset_minutes": 5000}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ReconcileConfig::from_json(r#"{"max_range_days": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ReconcileConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ReconcileConfig::from_file("/nonexistent/fxrecon.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
