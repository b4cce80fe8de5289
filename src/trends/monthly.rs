//! Monthly period calculations
//!
//! Groups dated amounts by calendar month.

use chrono::{Datelike, NaiveDate};

use super::group_by_label;
use crate::models::{DatedAmount, PeriodSample};

/// Get the month identifier (YYYY-MM) for a date
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Get the first day of the month for a date
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Get the last day of the month for a date
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    match next_month {
        Some(first) => first - chrono::Duration::days(1),
        None => date,
    }
}

/// Sum amounts per calendar month, sorted by month
pub fn aggregate_to_monthly(amounts: &[DatedAmount]) -> Vec<PeriodSample> {
    group_by_label(amounts, month_key)
}
