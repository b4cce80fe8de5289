//! Data models module
//!
//! Contains the data structures shared by every algorithm:
//! - Target settings, ranges and buckets
//! - Aggregate nodes and their category / dated-series children
//! - Period samples and metric sets
//! - Row shapes delivered by the data store

pub mod aggregate;
pub mod metrics;
pub mod rows;
pub mod target;

pub use aggregate::{AggregateNode, CategoryAmount, ChildMetrics, DatedAmount, OTHER_KEY};
pub use metrics::{PeriodMetricSet, PeriodSample, TrendPct};
pub use rows::{AggregateRow, ChildRow, SeriesRow};
pub use target::{
    DayOfWeekTargetBucket, PeriodKind, Registration, TargetBucket, TargetSetting, TimeRange,
};
