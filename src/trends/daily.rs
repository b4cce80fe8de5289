//! Day-level calendar helpers
//!
//! Date parsing, weekday numbering and exact weekday counting over
//! inclusive date spans.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::DatedAmount;
use crate::AnalyticsError;

/// Date format used by every row and label
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date in YYYY-MM-DD format
///
/// Handles formats like:
/// - "2020-01-15"
/// - "2020-01-15T10:30:00Z"
/// - "2020-01-15T10:30:00.000+01:00"
///
/// Only the date portion of a timestamp is kept; anything else after the
/// date is rejected.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, AnalyticsError> {
    let date_part = date_str.split_once('T').map_or(date_str, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| AnalyticsError::InvalidDate(date_str.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Weekday index, 0 = Monday .. 6 = Sunday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Days in `[from, to]`, both ends included; 0 when `from > to`
pub fn days_inclusive(from: NaiveDate, to: NaiveDate) -> i64 {
    ((to - from).num_days() + 1).max(0)
}

/// Number of times `day_of_week` occurs within `[from, to]`
pub fn count_weekday(from: NaiveDate, to: NaiveDate, day_of_week: u8) -> u32 {
    let days = days_inclusive(from, to);
    if days == 0 || day_of_week > 6 {
        return 0;
    }

    // Offset from `from` to the first occurrence of the weekday
    let offset = (i64::from(day_of_week) - i64::from(weekday_index(from))).rem_euclid(7);
    if offset >= days {
        0
    } else {
        ((days - 1 - offset) / 7 + 1) as u32
    }
}

/// Occurrences of every weekday within `[from, to]`, indexed 0 = Monday
pub fn weekday_counts(from: NaiveDate, to: NaiveDate) -> [u32; 7] {
    let mut counts = [0u32; 7];
    for (day, count) in counts.iter_mut().enumerate() {
        *count = count_weekday(from, to, day as u8);
    }
    counts
}

/// Merge amounts registered on the same date, sorted by date
pub fn aggregate_by_day(amounts: &[DatedAmount]) -> Vec<DatedAmount> {
    let mut daily_map: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for item in amounts {
        *daily_map.entry(item.date).or_insert(0.0) += item.amount;
    }

    daily_map
        .into_iter()
        .map(|(date, amount)| DatedAmount { date, amount })
        .collect()
}
