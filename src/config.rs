//! Analytics configuration
//!
//! Tunables shared by the report endpoints. Every field has a default so an
//! empty JSON object is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rollup::{CoordinationOptions, RollupLimits};
use crate::trends::Granularity;
use crate::AnalyticsError;

/// Configuration for the analytics algorithms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Limits for single-group rollups (area/category overviews, status)
    #[serde(default)]
    pub rollup: RollupLimits,
    /// Limits and Other policy for rollups coordinated across groups
    #[serde(default)]
    pub coordinated: CoordinationOptions,
    /// Period size of trend histories
    #[serde(default)]
    pub granularity: Granularity,
    /// Number of past periods compared against the current one
    #[serde(default = "default_history_periods")]
    pub history_periods: usize,
    /// Log level passed to [`crate::init_logging`]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_history_periods() -> usize {
    12
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            rollup: RollupLimits::default(),
            coordinated: CoordinationOptions::default(),
            granularity: Granularity::default(),
            history_periods: default_history_periods(),
            log_level: default_log_level(),
        }
    }
}

impl AnalyticsConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, AnalyticsError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalyticsError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_path(path: &Path) -> Result<Self, AnalyticsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AnalyticsError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        tracing::info!("Loaded analytics configuration from {}", path.display());
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.rollup.keep_top == 0 {
            return Err(AnalyticsError::Config("rollup.keep_top must be at least 1".to_string()));
        }
        if self.coordinated.keep_top == 0 {
            return Err(AnalyticsError::Config(
                "coordinated.keep_top must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollup::OtherPresence;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AnalyticsConfig::from_json_str("{}").unwrap();

        assert_eq!(config, AnalyticsConfig::default());
        assert_eq!(config.rollup.keep_top, 5);
        assert_eq!(config.rollup.child_keep_top, Some(3));
        assert_eq!(config.coordinated.other_presence, OtherPresence::PerGroup);
        assert_eq!(config.granularity, Granularity::Monthly);
        assert_eq!(config.history_periods, 12);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_config() {
        let config = AnalyticsConfig::from_json_str(
            r#"{"rollup":{"keep_top":10},"coordinated":{"other_presence":"uniform"},"granularity":"weekly"}"#,
        )
        .unwrap();

        assert_eq!(config.rollup.keep_top, 10);
        assert_eq!(config.rollup.child_keep_top, Some(3));
        assert_eq!(config.coordinated.other_presence, OtherPresence::Uniform);
        assert_eq!(config.granularity, Granularity::Weekly);
    }

    #[test]
    fn test_rejects_zero_keep_top() {
        let err = AnalyticsConfig::from_json_str(r#"{"rollup":{"keep_top":0}}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            AnalyticsConfig::from_json_str("{"),
            Err(AnalyticsError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = AnalyticsConfig::from_path(Path::new("/nonexistent/analytics.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
