//! Weekly period calculations
//!
//! Groups dated amounts by ISO week (Monday start).

use chrono::{Datelike, NaiveDate};

use super::daily::format_date;
use super::group_by_label;
use crate::models::{DatedAmount, PeriodSample};

/// Get the Monday of the week containing the given date
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - chrono::Duration::days(days_from_monday as i64)
}

/// Get the Sunday of the week containing the given date
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - date.weekday().num_days_from_monday();
    date + chrono::Duration::days(days_to_sunday as i64)
}

/// Period label of a week: its Monday as YYYY-MM-DD
pub fn week_label(date: NaiveDate) -> String {
    format_date(week_start(date))
}

/// Sum amounts per week, sorted by week start
pub fn aggregate_to_weekly(amounts: &[DatedAmount]) -> Vec<PeriodSample> {
    group_by_label(amounts, week_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::daily::parse_date;
    use chrono::Weekday;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_week_start() {
        // Wednesday, Jan 8, 2020
        let start = week_start(date("2020-01-08"));
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(format_date(start), "2020-01-06");

        // Monday itself
        assert_eq!(week_start(date("2020-01-06")), date("2020-01-06"));

        // Sunday
        assert_eq!(format_date(week_start(date("2020-01-12"))), "2020-01-06");
    }

    #[test]
    fn test_week_end() {
        let end = week_end(date("2020-01-08"));
        assert_eq!(end.weekday(), Weekday::Sun);
        assert_eq!(format_date(end), "2020-01-12");
        assert_eq!(week_end(date("2020-01-12")), date("2020-01-12"));
    }

    #[test]
    fn test_aggregate_to_weekly() {
        let amounts = vec![
            DatedAmount { date: date("2020-01-06"), amount: 10.0 }, // Monday
            DatedAmount { date: date("2020-01-07"), amount: 15.0 }, // Tuesday
            DatedAmount { date: date("2020-01-13"), amount: 5.0 },  // Next Monday
        ];

        let weekly = aggregate_to_weekly(&amounts);

        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0], PeriodSample::new("2020-01-06", 25.0));
        assert_eq!(weekly[1], PeriodSample::new("2020-01-13", 5.0));
    }

    #[test]
    fn test_week_crossing_year_boundary() {
        // Tue 2019-12-31 and Wed 2020-01-01 share a week
        let amounts = vec![
            DatedAmount { date: date("2019-12-31"), amount: 1.0 },
            DatedAmount { date: date("2020-01-01"), amount: 2.0 },
        ];

        let weekly = aggregate_to_weekly(&amounts);

        assert_eq!(weekly, vec![PeriodSample::new("2019-12-30", 3.0)]);
    }
}
