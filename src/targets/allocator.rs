//! Temporal target allocation
//!
//! Splits a customer's time-varying settings into contiguous buckets that
//! exactly cover a query range.

use chrono::{Duration, NaiveDate};

use crate::models::{TargetBucket, TargetSetting, TimeRange};

/// Anything that takes effect from a given date
pub trait EffectiveFrom {
    fn effective_from(&self) -> NaiveDate;
}

impl EffectiveFrom for TargetSetting {
    fn effective_from(&self) -> NaiveDate {
        self.effective_from
    }
}

/// Part of a range governed by a single setting
#[derive(Debug, Clone, PartialEq)]
pub struct Span<'a, T> {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub setting: &'a T,
}

impl<T> Span<'_, T> {
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

/// Partition `range` into spans, one per setting in effect during it.
///
/// The setting in effect at `range.from` is the latest one starting on or
/// before it; when every setting starts later, the earliest one covers the
/// start of the range. Settings starting after `range.to` are ignored. Of
/// several settings sharing a start date the one listed last wins.
///
/// # Panics
///
/// Panics when `settings` is empty or `range.from > range.to`. Callers must
/// handle "no target configured" before allocating.
pub fn partition<'a, T: EffectiveFrom>(settings: &'a [T], range: &TimeRange) -> Vec<Span<'a, T>> {
    assert!(
        !settings.is_empty(),
        "target allocation requires at least one setting"
    );
    assert!(
        range.is_valid(),
        "target allocation range is reversed: {} > {}",
        range.from,
        range.to
    );

    let mut sorted: Vec<&T> = settings.iter().collect();
    sorted.sort_by_key(|s| s.effective_from());

    let mut regimes: Vec<&T> = Vec::with_capacity(sorted.len());
    for setting in sorted {
        match regimes.last_mut() {
            Some(last) if last.effective_from() == setting.effective_from() => *last = setting,
            _ => regimes.push(setting),
        }
    }

    let start = regimes
        .iter()
        .rposition(|s| s.effective_from() <= range.from)
        .unwrap_or(0);
    let end = regimes
        .iter()
        .position(|s| s.effective_from() > range.to)
        .unwrap_or(regimes.len())
        .max(start + 1);
    let selected = &regimes[start..end];

    selected
        .iter()
        .enumerate()
        .map(|(i, setting)| {
            let from = if i == 0 {
                range.from
            } else {
                setting.effective_from()
            };
            let to = match selected.get(i + 1) {
                Some(next) => next.effective_from() - Duration::days(1),
                None => range.to,
            };
            Span { from, to, setting: *setting }
        })
        .collect()
}

/// Allocate target amounts over `range`.
///
/// Recurring settings contribute `daily_rate * days` per bucket, fixed ones
/// their amount unchanged. See [`partition`] for the bucket boundaries and
/// panics.
pub fn allocate(settings: &[TargetSetting], range: &TimeRange) -> Vec<TargetBucket> {
    let buckets: Vec<TargetBucket> = partition(settings, range)
        .into_iter()
        .map(|span| TargetBucket {
            from: span.from,
            to: span.to,
            amount: span.setting.amount_for_days(span.days()),
        })
        .collect();

    tracing::debug!(
        "Allocated {} settings over {}..{} into {} buckets",
        settings.len(),
        range.from,
        range.to,
        buckets.len()
    );

    buckets
}

/// Total expected amount of a set of buckets
pub fn expected_total(buckets: &[TargetBucket]) -> f64 {
    buckets.iter().map(|b| b.amount).sum()
}
