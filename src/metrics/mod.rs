//! Metrics calculation module
//!
//! Computes the figures shown in report headers:
//! - Current/best/worst/average period metrics and their trends
//! - Actual vs. allocated target
//! - Dimension selection and per-guest normalization

pub mod normalize;
pub mod period;
pub mod target;

pub use normalize::{measure, per_guest, period_samples, Dimension, MeasuredRow, ResourceType};
pub use period::{compute_period_metrics, round2, trend_pct};
pub use target::{compare_to_target, TargetComparison};

pub use crate::models::PeriodMetricSet;
