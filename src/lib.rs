//! Food-waste analytics core
//!
//! This library provides the numeric algorithms behind the waste and
//! guest-frequency reports. It handles:
//! - Splitting time-varying target settings into date buckets
//! - Top-N rollups with a merged "Other" bucket, per group and across groups
//! - Current/best/worst/average period metrics with trend percentages
//! - Day-of-week frequency counting against target weekdays
//! - CSV/JSON export of computed results
//!
//! Rows are expected to be aggregated by the data store already; nothing in
//! here performs I/O other than the export writers.

pub mod config;
pub mod export;
pub mod frequency;
pub mod metrics;
pub mod models;
pub mod rollup;
pub mod targets;
pub mod trends;

use std::str::FromStr;

pub use config::AnalyticsConfig;
pub use frequency::{count_days, DayCounts};
pub use metrics::{compute_period_metrics, PeriodMetricSet};
pub use rollup::{coordinate_groups, rollup, RolledUpGroup};
pub use targets::allocate;

/// Error type for analytics operations
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {from} is after {to}")]
    InvalidRange { from: String, to: String },

    #[error("Invalid target setting: {0}")]
    InvalidSetting(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// Serialized as its message so report handlers can embed it directly
impl serde::Serialize for AnalyticsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Install the fmt subscriber at the given level ("trace" .. "error").
///
/// Unknown levels fall back to INFO. Calling this more than once is harmless;
/// the first subscriber stays installed.
pub fn init_logging(level: &str) {
    let level = tracing::Level::from_str(level).unwrap_or(tracing::Level::INFO);

    if tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .is_ok()
    {
        tracing::info!("Analytics logging initialized at {}", level);
    }
}
