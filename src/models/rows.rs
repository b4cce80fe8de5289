//! Data store row types
//!
//! Shapes of the already-aggregated rows returned by the report queries and
//! their conversion into [`AggregateNode`]s.

use serde::{Deserialize, Serialize};

use super::aggregate::{AggregateNode, CategoryAmount, ChildMetrics, DatedAmount};
use crate::trends::daily::parse_date;
use crate::AnalyticsError;

/// Named sub-amount row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRow {
    pub label: String,
    pub value: f64,
}

/// Dated amount row, date in YYYY-MM-DD format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRow {
    pub date: String,
    pub amount: f64,
}

impl TryFrom<&SeriesRow> for DatedAmount {
    type Error = AnalyticsError;

    fn try_from(row: &SeriesRow) -> Result<Self, Self::Error> {
        Ok(DatedAmount {
            date: parse_date(&row.date)?,
            amount: row.amount,
        })
    }
}

/// Grouped row carrying either categories or registrations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRow {
    pub name: String,
    pub total: f64,
    #[serde(default)]
    pub avg: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub categories: Option<Vec<ChildRow>>,
    #[serde(default)]
    pub registrations: Option<Vec<SeriesRow>>,
}

impl TryFrom<AggregateRow> for AggregateNode {
    type Error = AnalyticsError;

    fn try_from(row: AggregateRow) -> Result<Self, Self::Error> {
        let children = match (row.registrations, row.categories) {
            (Some(registrations), _) => ChildMetrics::Series(
                registrations
                    .iter()
                    .map(DatedAmount::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            (None, Some(categories)) => ChildMetrics::Categories(
                categories
                    .into_iter()
                    .map(|c| CategoryAmount::new(c.label, c.value))
                    .collect(),
            ),
            (None, None) => ChildMetrics::default(),
        };

        Ok(AggregateNode {
            key: row.name,
            total: row.total,
            avg: row.avg,
            min: row.min,
            max: row.max,
            children,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one
pub fn nodes_from_rows(rows: Vec<AggregateRow>) -> Result<Vec<AggregateNode>, AnalyticsError> {
    rows.into_iter().map(AggregateNode::try_from).collect()
}

/// Parse a JSON array of rows straight into nodes
pub fn nodes_from_json(json: &str) -> Result<Vec<AggregateNode>, AnalyticsError> {
    let rows: Vec<AggregateRow> = serde_json::from_str(json)?;
    nodes_from_rows(rows)
}
