//! Rollup accumulators
//!
//! Single-pass accumulators used while merging nodes. Keys keep their
//! first-seen position so equal sums rank in input order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{CategoryAmount, ChildMetrics, DatedAmount};

/// Value used for ranking: non-finite values and -0.0 rank as 0
fn rank_value(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

/// Descending total order on values
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    rank_value(b).total_cmp(&rank_value(a))
}

/// Count, sum, min and max over node totals
#[derive(Debug, Clone, Default)]
pub struct TotalsAccumulator {
    count: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl TotalsAccumulator {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Mean of the pushed values, 0 when empty
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn min(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.max.unwrap_or(0.0)
    }
}

/// Per-key sums in first-seen key order
#[derive(Debug, Clone, Default)]
pub struct RankedSums {
    keys: Vec<String>,
    values: Vec<f64>,
    index: HashMap<String, usize>,
}

impl RankedSums {
    pub fn add(&mut self, key: &str, value: f64) {
        match self.index.get(key) {
            Some(&i) => self.values[i] += value,
            None => {
                self.index.insert(key.to_string(), self.keys.len());
                self.keys.push(key.to_string());
                self.values.push(value);
            }
        }
    }

    pub fn add_categories(&mut self, categories: &[CategoryAmount]) {
        for category in categories {
            self.add(&category.label, category.value);
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Entries sorted by sum, descending; ties keep first-seen order
    pub fn ranked(&self) -> Vec<(String, f64)> {
        let mut entries: Vec<(String, f64)> = self
            .keys
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect();
        entries.sort_by(|a, b| descending(a.1, b.1));
        entries
    }

    /// Keys of the `limit` largest sums (all keys when `None`)
    pub fn top_keys(&self, limit: Option<usize>) -> Vec<String> {
        let ranked = self.ranked().into_iter().map(|(key, _)| key);
        match limit {
            Some(n) => ranked.take(n).collect(),
            None => ranked.collect(),
        }
    }
}

/// Children merged across nodes, by category label or by date
#[derive(Debug, Clone, Default)]
pub enum ChildrenAccumulator {
    #[default]
    Empty,
    Categories(RankedSums),
    Series(BTreeMap<NaiveDate, f64>),
}

impl ChildrenAccumulator {
    /// Merge one node's children. Children of a different kind than the ones
    /// already merged are skipped.
    pub fn add(&mut self, children: &ChildMetrics) {
        if children.is_empty() {
            return;
        }

        if let ChildrenAccumulator::Empty = self {
            *self = match children {
                ChildMetrics::Categories(_) => ChildrenAccumulator::Categories(RankedSums::default()),
                ChildMetrics::Series(_) => ChildrenAccumulator::Series(BTreeMap::new()),
            };
        }

        match (self, children) {
            (ChildrenAccumulator::Categories(sums), ChildMetrics::Categories(items)) => {
                sums.add_categories(items);
            }
            (ChildrenAccumulator::Series(days), ChildMetrics::Series(items)) => {
                for item in items {
                    *days.entry(item.date).or_insert(0.0) += item.amount;
                }
            }
            (_, other) => {
                tracing::warn!("Skipping {} children of mismatched kind", other.len());
            }
        }
    }

    /// Merged children. Categories are ranked by summed value and truncated
    /// to `keep`; series stay chronological and complete.
    pub fn finish(&self, keep: Option<usize>) -> ChildMetrics {
        match self {
            ChildrenAccumulator::Empty => ChildMetrics::default(),
            ChildrenAccumulator::Categories(sums) => {
                let ranked = sums
                    .ranked()
                    .into_iter()
                    .map(|(label, value)| CategoryAmount { label, value });
                ChildMetrics::Categories(match keep {
                    Some(n) => ranked.take(n).collect(),
                    None => ranked.collect(),
                })
            }
            ChildrenAccumulator::Series(days) => ChildMetrics::Series(
                days.iter()
                    .map(|(&date, &amount)| DatedAmount { date, amount })
                    .collect(),
            ),
        }
    }
}
