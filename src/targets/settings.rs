//! Target settings normalization
//!
//! Converts settings as configured by the customer ("700 g per week from
//! 2019-12-01") into per-day [`TargetSetting`]s.

use serde::{Deserialize, Serialize};

use crate::models::TargetSetting;
use crate::trends::daily::parse_date;
use crate::AnalyticsError;

const DAYS_PER_WEEK: f64 = 7.0;
const DAYS_PER_YEAR: f64 = 365.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Period a configured amount refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPeriod {
    Day,
    Week,
    Month,
    Year,
    /// Constant amount, not prorated
    Fixed,
}

impl TargetPeriod {
    /// Per-day rate of `amount`, or the amount itself for fixed targets
    pub fn daily_rate(&self, amount: f64) -> f64 {
        match self {
            Self::Day | Self::Fixed => amount,
            Self::Week => amount / DAYS_PER_WEEK,
            Self::Month => amount * MONTHS_PER_YEAR / DAYS_PER_YEAR,
            Self::Year => amount / DAYS_PER_YEAR,
        }
    }
}

/// Target setting as stored by the settings collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSettingInput {
    /// Start date in YYYY-MM-DD format
    pub from: String,
    pub amount: f64,
    pub period: TargetPeriod,
}

impl TargetSettingInput {
    pub fn normalize(&self) -> Result<TargetSetting, AnalyticsError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(AnalyticsError::InvalidSetting(format!(
                "amount {} from {} must be a non-negative number",
                self.amount, self.from
            )));
        }

        let effective_from = parse_date(&self.from)?;
        let rate = self.period.daily_rate(self.amount);

        Ok(match self.period {
            TargetPeriod::Fixed => TargetSetting::fixed(effective_from, rate),
            _ => TargetSetting::recurring(effective_from, rate),
        })
    }
}

/// Normalize every input, failing on the first invalid one
pub fn normalize_settings(inputs: &[TargetSettingInput]) -> Result<Vec<TargetSetting>, AnalyticsError> {
    inputs.iter().map(TargetSettingInput::normalize).collect()
}
