//! Trend series module
//!
//! Turns dated registration amounts into period samples:
//! - Weekly/monthly grouping of time-series rows
//! - Zero-filling of periods without registrations
//! - Splitting a series into the current period and its history

pub mod daily;
pub mod monthly;
pub mod weekly;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::compute_period_metrics;
use crate::models::{DatedAmount, PeriodMetricSet, PeriodSample, TimeRange};

/// Period size for trend histories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Weekly,
    #[default]
    Monthly,
}

impl From<&str> for Granularity {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "weekly" | "week" => Granularity::Weekly,
            _ => Granularity::Monthly,
        }
    }
}

impl Granularity {
    /// Label of the period containing `date`
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Weekly => weekly::week_label(date),
            Granularity::Monthly => monthly::month_key(date),
        }
    }

    /// First day of the period containing `date`
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Weekly => weekly::week_start(date),
            Granularity::Monthly => monthly::month_start(date),
        }
    }

    /// Last day of the period containing `date`
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Weekly => weekly::week_end(date),
            Granularity::Monthly => monthly::month_end(date),
        }
    }
}

/// Sum amounts under the label produced by `label_of`, sorted by label.
///
/// Labels are ISO formatted so lexical order is chronological.
pub(crate) fn group_by_label<F>(amounts: &[DatedAmount], label_of: F) -> Vec<PeriodSample>
where
    F: Fn(NaiveDate) -> String,
{
    let mut periods: BTreeMap<String, f64> = BTreeMap::new();

    for item in amounts {
        *periods.entry(label_of(item.date)).or_insert(0.0) += item.amount;
    }

    periods
        .into_iter()
        .map(|(label, value)| PeriodSample { label, value })
        .collect()
}

/// Group a dated series into period samples
pub fn bucket_series(amounts: &[DatedAmount], granularity: Granularity) -> Vec<PeriodSample> {
    match granularity {
        Granularity::Weekly => weekly::aggregate_to_weekly(amounts),
        Granularity::Monthly => monthly::aggregate_to_monthly(amounts),
    }
}

/// Insert zero samples for every period of `range` without one
pub fn fill_missing_periods(
    samples: Vec<PeriodSample>,
    range: &TimeRange,
    granularity: Granularity,
) -> Vec<PeriodSample> {
    let mut periods: BTreeMap<String, f64> = samples
        .into_iter()
        .map(|s| (s.label, s.value))
        .collect();

    let mut current = granularity.period_start(range.from);
    while current <= range.to {
        periods.entry(granularity.label(current)).or_insert(0.0);
        match granularity.period_end(current).succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    periods
        .into_iter()
        .map(|(label, value)| PeriodSample { label, value })
        .collect()
}

/// Split chronological samples into the last (current) value and up to
/// `history_periods` samples preceding it, most recent last
pub fn split_current(samples: &[PeriodSample], history_periods: usize) -> (f64, Vec<PeriodSample>) {
    match samples.split_last() {
        Some((current, earlier)) => {
            let skip = earlier.len().saturating_sub(history_periods);
            (current.value, earlier[skip..].to_vec())
        }
        None => (0.0, Vec::new()),
    }
}

/// Period metrics for a dated series restricted to `range`
pub fn summarize_series(
    amounts: &[DatedAmount],
    range: &TimeRange,
    granularity: Granularity,
    history_periods: usize,
) -> PeriodMetricSet {
    let in_range: Vec<DatedAmount> = amounts
        .iter()
        .filter(|a| range.contains(a.date))
        .cloned()
        .collect();

    if in_range.len() < amounts.len() {
        tracing::debug!(
            "Dropped {} registrations outside {}..{}",
            amounts.len() - in_range.len(),
            range.from,
            range.to
        );
    }

    let samples = fill_missing_periods(bucket_series(&in_range, granularity), range, granularity);
    let (current, history) = split_current(&samples, history_periods);

    compute_period_metrics(current, &history)
}
