//! Frequency target schedule
//!
//! Expands the target weekdays configured over time into per-bucket weekday
//! counts for a query range.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DayOfWeekTargetBucket, TimeRange};
use crate::targets::{partition, EffectiveFrom};
use crate::trends::daily::{count_weekday, parse_date};
use crate::AnalyticsError;

/// Weekdays on which registrations are expected, from a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySetting {
    pub effective_from: NaiveDate,
    /// 0 = Monday .. 6 = Sunday
    pub target_days: BTreeSet<u8>,
}

impl EffectiveFrom for FrequencySetting {
    fn effective_from(&self) -> NaiveDate {
        self.effective_from
    }
}

/// Frequency setting as stored by the settings collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencySettingInput {
    pub from: String,
    pub days: Vec<u8>,
}

impl FrequencySettingInput {
    pub fn normalize(&self) -> Result<FrequencySetting, AnalyticsError> {
        if let Some(day) = self.days.iter().find(|d| **d > 6) {
            return Err(AnalyticsError::InvalidSetting(format!(
                "weekday {} from {} is outside 0..=6",
                day, self.from
            )));
        }

        Ok(FrequencySetting {
            effective_from: parse_date(&self.from)?,
            target_days: self.days.iter().copied().collect(),
        })
    }
}

/// Partition `range` by the frequency settings in effect and count each
/// target weekday inside every bucket.
///
/// # Panics
///
/// Same preconditions as [`partition`]: at least one setting and a
/// non-reversed range.
pub fn build_day_buckets(settings: &[FrequencySetting], range: &TimeRange) -> Vec<DayOfWeekTargetBucket> {
    partition(settings, range)
        .into_iter()
        .map(|span| {
            let target_days_of_week: BTreeMap<u8, u32> = span
                .setting
                .target_days
                .iter()
                .map(|&day| (day, count_weekday(span.from, span.to, day)))
                .collect();

            DayOfWeekTargetBucket {
                from: span.from,
                to: span.to,
                target_days_of_week,
            }
        })
        .collect()
}
