//! Registration frequency module
//!
//! Measures how regularly a customer registers waste:
//! - Target weekdays per bucket, derived from frequency settings over time
//! - Registrations on target vs. other weekdays
//! - Hit ratio of target days

pub mod day_counter;
pub mod schedule;

pub use day_counter::{count_days, count_per_bucket, on_target_ratio, DayCounts};
pub use schedule::{build_day_buckets, FrequencySetting, FrequencySettingInput};
