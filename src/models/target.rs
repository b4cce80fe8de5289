//! Target data types
//!
//! Target settings, the ranges they are allocated over and the buckets
//! produced by allocation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::trends::daily::{format_date, parse_date, weekday_index};
use crate::AnalyticsError;

/// How a setting's rate turns into a bucket amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Per-day rate, scaled by the number of days in the bucket
    Recurring,
    /// One-off constant, independent of bucket length
    Fixed,
}

/// One regime of an expected-waste or expected-frequency target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSetting {
    pub effective_from: NaiveDate,
    /// Per-day amount for recurring settings, constant amount for fixed ones
    pub daily_rate: f64,
    pub period_kind: PeriodKind,
}

impl TargetSetting {
    pub fn recurring(effective_from: NaiveDate, daily_rate: f64) -> Self {
        Self {
            effective_from,
            daily_rate,
            period_kind: PeriodKind::Recurring,
        }
    }

    pub fn fixed(effective_from: NaiveDate, amount: f64) -> Self {
        Self {
            effective_from,
            daily_rate: amount,
            period_kind: PeriodKind::Fixed,
        }
    }

    /// Amount this setting contributes to a bucket of `days` days
    pub fn amount_for_days(&self, days: i64) -> f64 {
        match self.period_kind {
            PeriodKind::Fixed => self.daily_rate,
            PeriodKind::Recurring => self.daily_rate * days as f64,
        }
    }
}

/// Inclusive date range, `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl TimeRange {
    /// Create a range, rejecting `from > to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, AnalyticsError> {
        if from > to {
            return Err(AnalyticsError::InvalidRange {
                from: format_date(from),
                to: format_date(to),
            });
        }
        Ok(Self { from, to })
    }

    /// Parse a range from two YYYY-MM-DD strings
    pub fn parse(from: &str, to: &str) -> Result<Self, AnalyticsError> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }

    /// Number of days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn is_valid(&self) -> bool {
        self.from <= self.to
    }
}

/// Contiguous slice of a range carrying one target amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetBucket {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub amount: f64,
}

impl TargetBucket {
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

/// Bucket of a frequency target.
///
/// Maps each target weekday (0 = Monday .. 6 = Sunday) to the number of times
/// it occurs within `[from, to]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekTargetBucket {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub target_days_of_week: BTreeMap<u8, u32>,
}

impl DayOfWeekTargetBucket {
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn is_target_day(&self, day_of_week: u8) -> bool {
        self.target_days_of_week.contains_key(&day_of_week)
    }

    /// Calendar days in the bucket falling on a target weekday
    pub fn total_target_days(&self) -> u32 {
        self.target_days_of_week.values().sum()
    }
}

/// A day on which the customer registered waste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub date: NaiveDate,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
}

impl Registration {
    /// Registration on `date`, weekday derived from the date
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            day_of_week: weekday_index(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_time_range_rejects_reversed() {
        let err = TimeRange::new(date("2020-02-01"), date("2020-01-01")).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidRange { .. }));
        assert!(TimeRange::parse("2020-01-01", "2020-01-01").is_ok());
    }

    #[test]
    fn test_time_range_days_inclusive() {
        let range = TimeRange::parse("2019-12-15", "2020-01-15").unwrap();
        assert_eq!(range.days(), 32);
        assert!(range.contains(date("2019-12-15")));
        assert!(range.contains(date("2020-01-15")));
        assert!(!range.contains(date("2020-01-16")));
    }

    #[test]
    fn test_amount_for_days() {
        let recurring = TargetSetting::recurring(date("1970-01-01"), 100.0);
        let fixed = TargetSetting::fixed(date("1970-01-01"), 100.0);
        assert_eq!(recurring.amount_for_days(7), 700.0);
        assert_eq!(fixed.amount_for_days(7), 100.0);
        assert_eq!(fixed.amount_for_days(300), 100.0);
    }

    #[test]
    fn test_registration_weekday() {
        // 2020-01-06 was a Monday
        assert_eq!(Registration::on(date("2020-01-06")).day_of_week, 0);
        assert_eq!(Registration::on(date("2020-01-12")).day_of_week, 6);
    }

    #[test]
    fn test_target_setting_serialization() {
        let setting = TargetSetting::fixed(date("2019-12-01"), 42.0);
        let json = serde_json::to_string(&setting).unwrap();
        assert!(json.contains("\"effective_from\":\"2019-12-01\""));
        assert!(json.contains("\"period_kind\":\"fixed\""));
    }
}
