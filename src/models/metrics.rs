//! Metrics data types
//!
//! Period samples and the metric sets computed from them

use serde::{Deserialize, Serialize};

/// One historical period's value (e.g. one month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSample {
    pub label: String,
    pub value: f64,
}

impl PeriodSample {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Trend percentages for each reported metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendPct {
    pub current: f64,
    pub best: f64,
    pub worst: f64,
    pub average: f64,
}

/// Current/best/worst/average values with their trends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetricSet {
    pub current: f64,
    pub best: f64,
    pub worst: f64,
    pub average: f64,
    pub trend_pct: TrendPct,
}

impl PeriodMetricSet {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
