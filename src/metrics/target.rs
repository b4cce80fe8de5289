//! Target comparison
//!
//! Compares an actual amount against the expected amount allocated for the
//! same range.

use serde::{Deserialize, Serialize};

use super::period::{round2, trend_pct};
use crate::models::TargetBucket;
use crate::targets::expected_total;

/// Actual vs. expected for one range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetComparison {
    pub actual: f64,
    pub expected: f64,
    /// Percentage above (positive) or below (negative) the target
    pub trend_pct: f64,
}

impl TargetComparison {
    pub fn on_target(&self) -> bool {
        self.actual <= self.expected
    }
}

pub fn compare_to_target(actual: f64, buckets: &[TargetBucket]) -> TargetComparison {
    let expected = expected_total(buckets);

    TargetComparison {
        actual: round2(actual),
        expected: round2(expected),
        trend_pct: round2(trend_pct(actual, expected)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TargetSetting, TimeRange};
    use crate::targets::allocate;
    use crate::trends::daily::parse_date;

    #[test]
    fn test_compare_to_allocated_target() {
        let settings = vec![
            TargetSetting::recurring(parse_date("1970-01-01").unwrap(), 1000.0 / 7.0),
            TargetSetting::recurring(parse_date("2020-01-01").unwrap(), 2000.0 / 7.0),
        ];
        let buckets = allocate(&settings, &TimeRange::parse("2019-12-15", "2020-01-15").unwrap());

        let comparison = compare_to_target(6000.0, &buckets);

        assert_eq!(comparison.expected, 6714.29);
        assert_eq!(comparison.trend_pct, -10.64);
        assert!(comparison.on_target());
    }

    #[test]
    fn test_compare_without_target() {
        let comparison = compare_to_target(10.0, &[]);
        assert_eq!(comparison.expected, 0.0);
        assert_eq!(comparison.trend_pct, 0.0);
        assert!(!comparison.on_target());
    }
}
