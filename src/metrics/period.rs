//! Period metric calculation
//!
//! Current/best/worst/average values of a period against its history, with
//! trend percentages.

use crate::models::{PeriodMetricSet, PeriodSample, TrendPct};

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change of `value` relative to `baseline`.
///
/// Defined as 0 when either side is 0 or not finite.
pub fn trend_pct(value: f64, baseline: f64) -> f64 {
    if baseline == 0.0 || value == 0.0 || !baseline.is_finite() || !value.is_finite() {
        return 0.0;
    }
    100.0 * (value - baseline) / baseline
}

/// Compute metrics for `current` given chronological `history` (most recent
/// period last).
///
/// Periods without registrations (value 0) are left out of best, worst and
/// average; `current` is always reported as is. Lower is better: best is the
/// smallest value, worst the largest. The current trend compares against the
/// previous period, the other trends compare each metric against `current`.
/// Values are rounded to two decimals only on the way out.
pub fn compute_period_metrics(current: f64, history: &[PeriodSample]) -> PeriodMetricSet {
    let current = if current.is_finite() { current } else { 0.0 };

    let values: Vec<f64> = std::iter::once(current)
        .chain(history.iter().map(|s| s.value))
        .filter(|v| v.is_finite() && *v != 0.0)
        .collect();

    if values.is_empty() {
        return PeriodMetricSet::default();
    }

    let best = values.iter().copied().fold(f64::INFINITY, f64::min);
    let worst = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average = values.iter().sum::<f64>() / values.len() as f64;
    let previous = history.last().map(|s| s.value).unwrap_or(0.0);

    let metrics = PeriodMetricSet {
        current: round2(current),
        best: round2(best),
        worst: round2(worst),
        average: round2(average),
        trend_pct: TrendPct {
            current: round2(trend_pct(current, previous)),
            best: round2(trend_pct(best, current)),
            worst: round2(trend_pct(worst, current)),
            average: round2(trend_pct(average, current)),
        },
    };

    tracing::trace!(
        "Period metrics over {} non-empty periods: {:?}",
        values.len(),
        metrics
    );

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(values: &[f64]) -> Vec<PeriodSample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PeriodSample::new(format!("2020-{:02}", i + 1), *v))
            .collect()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2428.571428), 2428.57);
        assert_eq!(round2(-4.166666), -4.17);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_trend_pct() {
        assert_eq!(trend_pct(120.0, 100.0), 20.0);
        assert_eq!(trend_pct(50.0, 100.0), -50.0);
        assert_eq!(trend_pct(50.0, 0.0), 0.0);
        assert_eq!(trend_pct(0.0, 100.0), 0.0);
        assert_eq!(trend_pct(f64::NAN, 100.0), 0.0);
    }

    #[test]
    fn test_all_zero_input() {
        let metrics = compute_period_metrics(0.0, &[]);
        assert!(metrics.is_zero());

        let metrics = compute_period_metrics(0.0, &history(&[0.0, 0.0]));
        assert!(metrics.is_zero());
    }

    #[test]
    fn test_zero_current_with_history() {
        let metrics = compute_period_metrics(0.0, &history(&[100.0, 0.0, 50.0]));

        assert_eq!(metrics.current, 0.0);
        assert_eq!(metrics.best, 50.0);
        assert_eq!(metrics.worst, 100.0);
        assert_eq!(metrics.average, 75.0);
        assert_eq!(metrics.trend_pct, TrendPct::default());
    }

    #[test]
    fn test_trends_against_previous_and_current() {
        let metrics = compute_period_metrics(80.0, &history(&[100.0, 50.0]));

        assert_eq!(metrics.current, 80.0);
        assert_eq!(metrics.best, 50.0);
        assert_eq!(metrics.worst, 100.0);
        assert_eq!(metrics.average, 76.67);
        // 80 vs previous period 50
        assert_eq!(metrics.trend_pct.current, 60.0);
        assert_eq!(metrics.trend_pct.best, -37.5);
        assert_eq!(metrics.trend_pct.worst, 25.0);
        assert_eq!(metrics.trend_pct.average, -4.17);
    }

    #[test]
    fn test_previous_period_without_registrations() {
        let metrics = compute_period_metrics(40.0, &history(&[20.0, 0.0]));

        assert_eq!(metrics.trend_pct.current, 0.0);
        assert_eq!(metrics.best, 20.0);
        assert_eq!(metrics.average, 30.0);
    }

    #[test]
    fn test_current_only() {
        let metrics = compute_period_metrics(12.3456, &[]);

        assert_eq!(metrics.current, 12.35);
        assert_eq!(metrics.best, 12.35);
        assert_eq!(metrics.worst, 12.35);
        assert_eq!(metrics.trend_pct, TrendPct::default());
    }

    #[test]
    fn test_never_nan() {
        let metrics = compute_period_metrics(f64::NAN, &history(&[f64::INFINITY, 3.0]));
        for value in [
            metrics.current,
            metrics.best,
            metrics.worst,
            metrics.average,
            metrics.trend_pct.current,
            metrics.trend_pct.best,
            metrics.trend_pct.worst,
            metrics.trend_pct.average,
        ] {
            assert!(value.is_finite());
        }
    }
}
