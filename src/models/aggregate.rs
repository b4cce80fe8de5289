//! Aggregate node types
//!
//! Nodes of the area / category / account hierarchy as delivered by the data
//! store, plus the synthetic "Other" node built by the rollups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Key of the synthetic node holding everything outside a top-N selection
pub const OTHER_KEY: &str = "Other";

/// Named sub-amount of a node (one category, one product)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub label: String,
    pub value: f64,
}

impl CategoryAmount {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Amount registered on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedAmount {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Children of an aggregate node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ChildMetrics {
    /// Named sub-amounts, e.g. categories of an area
    Categories(Vec<CategoryAmount>),
    /// Time series of registrations
    Series(Vec<DatedAmount>),
}

impl Default for ChildMetrics {
    fn default() -> Self {
        ChildMetrics::Categories(Vec::new())
    }
}

impl ChildMetrics {
    pub fn len(&self) -> usize {
        match self {
            ChildMetrics::Categories(items) => items.len(),
            ChildMetrics::Series(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Category children, if this node carries categories
    pub fn categories(&self) -> Option<&[CategoryAmount]> {
        match self {
            ChildMetrics::Categories(items) => Some(items),
            ChildMetrics::Series(_) => None,
        }
    }

    /// Sum of all child values
    pub fn sum(&self) -> f64 {
        match self {
            ChildMetrics::Categories(items) => items.iter().map(|c| c.value).sum(),
            ChildMetrics::Series(items) => items.iter().map(|d| d.amount).sum(),
        }
    }
}

/// One grouped row: an area, category or account with its statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateNode {
    pub key: String,
    pub total: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub children: ChildMetrics,
}

impl AggregateNode {
    /// Node whose avg/min/max all equal its total, without children
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        Self {
            key: key.into(),
            total,
            avg: total,
            min: total,
            max: total,
            children: ChildMetrics::default(),
        }
    }

    pub fn with_children(mut self, children: ChildMetrics) -> Self {
        self.children = children;
        self
    }

    /// Attach category children from `(label, value)` pairs
    pub fn with_categories<S: Into<String>>(self, categories: Vec<(S, f64)>) -> Self {
        self.with_children(ChildMetrics::Categories(
            categories
                .into_iter()
                .map(|(label, value)| CategoryAmount::new(label, value))
                .collect(),
        ))
    }

    pub fn is_other(&self) -> bool {
        self.key == OTHER_KEY
    }
}
