//! Dimension selection and per-guest normalization
//!
//! Daily measurement rows carry weight, cost and CO2 side by side; reports
//! pick one dimension and optionally divide by the number of guests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{DatedAmount, PeriodSample};
use crate::trends::daily::parse_date;
use crate::trends::Granularity;
use crate::AnalyticsError;

/// Numeric field being aggregated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Weight,
    Cost,
    Co2,
}

/// Whether a metric is totalized or normalized per guest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Total,
    PerGuest,
}

/// One day of measurements as returned by the data store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasuredRow {
    pub date: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub co2: f64,
    #[serde(default)]
    pub guests: f64,
}

impl Dimension {
    pub fn pick(&self, row: &MeasuredRow) -> f64 {
        match self {
            Self::Weight => row.weight,
            Self::Cost => row.cost,
            Self::Co2 => row.co2,
        }
    }
}

/// `value / guests`, 0 when there were no guests
pub fn per_guest(value: f64, guests: f64) -> f64 {
    if guests <= 0.0 {
        0.0
    } else {
        value / guests
    }
}

/// Dated amounts of one dimension
pub fn measure(rows: &[MeasuredRow], dimension: Dimension) -> Result<Vec<DatedAmount>, AnalyticsError> {
    rows.iter()
        .map(|row| {
            Ok(DatedAmount {
                date: parse_date(&row.date)?,
                amount: dimension.pick(row),
            })
        })
        .collect()
}

/// Period samples of one dimension.
///
/// Per-guest values divide the period's summed amount by the period's summed
/// guests, not the mean of daily ratios.
pub fn period_samples(
    rows: &[MeasuredRow],
    dimension: Dimension,
    resource: ResourceType,
    granularity: Granularity,
) -> Result<Vec<PeriodSample>, AnalyticsError> {
    let mut periods: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for row in rows {
        let label = granularity.label(parse_date(&row.date)?);
        let entry = periods.entry(label).or_insert((0.0, 0.0));
        entry.0 += dimension.pick(row);
        entry.1 += row.guests;
    }

    Ok(periods
        .into_iter()
        .map(|(label, (amount, guests))| {
            let value = match resource {
                ResourceType::Total => amount,
                ResourceType::PerGuest => per_guest(amount, guests),
            };
            PeriodSample { label, value }
        })
        .collect())
}
