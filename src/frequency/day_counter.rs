//! Day-of-week frequency counting
//!
//! Reconciles the calendar days expected to carry a registration with the
//! days registrations actually landed on.

use serde::{Deserialize, Serialize};

use crate::models::{DayOfWeekTargetBucket, Registration};

/// Target vs. non-target day counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    /// Registrations on a target weekday
    pub on_target_days: u32,
    /// Registrations on any other weekday
    pub on_other_days: u32,
    /// Calendar days falling on a target weekday
    pub total_target_days: u32,
    /// Calendar days falling on any other weekday
    pub total_other_days: u32,
}

impl DayCounts {
    pub fn add(&mut self, other: &DayCounts) {
        self.on_target_days += other.on_target_days;
        self.on_other_days += other.on_other_days;
        self.total_target_days += other.total_target_days;
        self.total_other_days += other.total_other_days;
    }

    pub fn total_days(&self) -> u32 {
        self.total_target_days + self.total_other_days
    }
}

/// Calendar counts of a bucket, without registrations
fn calendar_counts(bucket: &DayOfWeekTargetBucket) -> DayCounts {
    let total_target_days = bucket.total_target_days();
    let days = u32::try_from(bucket.days()).unwrap_or(0);

    DayCounts {
        total_target_days,
        total_other_days: days.saturating_sub(total_target_days),
        ..Default::default()
    }
}

/// Counts per bucket, in bucket order.
///
/// Each registration is matched to the bucket containing its date and
/// classified by its weekday. Registrations outside every bucket are
/// ignored.
pub fn count_per_bucket(buckets: &[DayOfWeekTargetBucket], registrations: &[Registration]) -> Vec<DayCounts> {
    let mut counts: Vec<DayCounts> = buckets.iter().map(calendar_counts).collect();
    let mut unmatched = 0usize;

    for registration in registrations {
        match buckets.iter().position(|b| b.contains(registration.date)) {
            Some(i) => {
                if buckets[i].is_target_day(registration.day_of_week) {
                    counts[i].on_target_days += 1;
                } else {
                    counts[i].on_other_days += 1;
                }
            }
            None => unmatched += 1,
        }
    }

    if unmatched > 0 {
        tracing::warn!(
            "{} of {} registrations fall outside every frequency bucket",
            unmatched,
            registrations.len()
        );
    }

    counts
}

/// Counts accumulated over every bucket of the range
pub fn count_days(buckets: &[DayOfWeekTargetBucket], registrations: &[Registration]) -> DayCounts {
    let mut total = DayCounts::default();
    for counts in count_per_bucket(buckets, registrations) {
        total.add(&counts);
    }

    tracing::debug!(
        "Frequency over {} buckets: {}/{} target days hit, {} registrations on other days",
        buckets.len(),
        total.on_target_days,
        total.total_target_days,
        total.on_other_days
    );

    total
}

/// Percentage of target days that received a registration, 0 without
/// target days
pub fn on_target_ratio(counts: &DayCounts) -> f64 {
    if counts.total_target_days == 0 {
        return 0.0;
    }
    100.0 * f64::from(counts.on_target_days) / f64::from(counts.total_target_days)
}
