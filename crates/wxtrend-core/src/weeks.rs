//! Weekly bucketing.
//!
//! A week starts at midnight UTC on [`WEEK_START`]. Bucket boundaries are the
//! unit of existence checks and of fetch-and-fill, so two ranges over the same
//! weeks always produce identical sequences.

use chrono::{DateTime, Datelike, TimeDelta, Utc, Weekday};

use crate::dates::DayBound;

/// First day of every bucket. Weekly trend series are Sunday-anchored.
pub const WEEK_START: Weekday = Weekday::Sun;

/// Midnight of the week-start day at or before `t`.
#[must_use]
pub fn week_start_of(t: impl DayBound) -> DateTime<Utc> {
    let day = t.to_midnight();
    let back =
        (day.weekday().num_days_from_monday() + 7 - WEEK_START.num_days_from_monday()) % 7;
    day - TimeDelta::days(i64::from(back))
}

/// Week-start timestamps covering `[start, end]`.
///
/// The first element is the week start containing `start`; the sequence then
/// advances in 7-day steps for as long as it stays `<= end`. Both inputs are
/// normalized to midnight first. Returns an empty sequence when `start` falls
/// on a later day than `end`.
#[must_use]
pub fn week_starts(start: impl DayBound, end: impl DayBound) -> Vec<DateTime<Utc>> {
    let start = start.to_midnight();
    let end = end.to_midnight();
    if start > end {
        return Vec::new();
    }

    let step = TimeDelta::days(7);
    let mut weeks = Vec::new();
    let mut current = week_start_of(start);
    while current <= end {
        weeks.push(current);
        match current.checked_add_signed(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    weeks
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_of_sunday_is_itself() {
        // 2024-03-03 is a Sunday.
        let sunday = date(2024, 3, 3);
        assert_eq!(week_start_of(sunday), sunday.to_midnight());
    }

    #[test]
    fn week_start_of_saturday_is_previous_sunday() {
        assert_eq!(week_start_of(date(2024, 3, 9)), date(2024, 3, 3).to_midnight());
    }

    #[test]
    fn same_day_yields_single_bucket() {
        let d = date(2024, 3, 6);
        let weeks = week_starts(d, d);
        assert_eq!(weeks, vec![date(2024, 3, 3).to_midnight()]);
    }

    #[test]
    fn range_spanning_three_weeks() {
        let weeks = week_starts(date(2024, 3, 4), date(2024, 3, 18));
        assert_eq!(
            weeks,
            vec![
                date(2024, 3, 3).to_midnight(),
                date(2024, 3, 10).to_midnight(),
                date(2024, 3, 17).to_midnight(),
            ]
        );
    }

    #[test]
    fn end_on_week_start_is_included() {
        let weeks = week_starts(date(2024, 3, 3), date(2024, 3, 10));
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[1], date(2024, 3, 10).to_midnight());
    }

    #[test]
    fn time_of_day_is_ignored() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 13, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 18, 23, 59, 59).unwrap();
        assert_eq!(
            week_starts(start, end),
            week_starts(date(2024, 3, 4), date(2024, 3, 18))
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(week_starts(date(2024, 3, 18), date(2024, 3, 4)).is_empty());
    }

    #[test]
    fn range_ending_at_latest_date_stops_without_overflow() {
        let last_day = NaiveDate::MAX;
        let weeks = week_starts(last_day - TimeDelta::days(10), last_day);
        assert!(weeks.len() >= 2);
        assert_eq!(weeks.last(), Some(&week_start_of(last_day)));
        assert!(weeks.windows(2).all(|w| w[1] - w[0] == TimeDelta::days(7)));
    }

    #[test]
    fn sequences_are_strictly_increasing_and_bounded() {
        let start = date(2023, 12, 20);
        for span in 0..120 {
            let end = start + TimeDelta::days(span);
            let weeks = week_starts(start, end);

            assert!(!weeks.is_empty(), "span {span} produced no buckets");
            assert!(weeks[0] <= start.to_midnight());
            assert!(weeks.windows(2).all(|w| w[1] - w[0] == TimeDelta::days(7)));

            let last = *weeks.last().unwrap();
            assert!(last <= end.to_midnight());
            assert!(last + TimeDelta::days(7) > end.to_midnight());
            assert!(weeks.iter().all(|w| w.weekday() == WEEK_START));
        }
    }
}
