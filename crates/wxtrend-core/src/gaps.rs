//! Missing-range detection over a week-start sequence.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A contiguous run of missing buckets, expressed as a refetch range.
///
/// `end` is the first present week start after the run, or the last element
/// of the scanned sequence when the run reaches the end. In the first case the
/// range therefore includes one bucket that is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Scan `week_starts` in order and return the missing runs.
///
/// `exists` is called exactly once per week start, in order.
pub fn find_gaps<F>(week_starts: &[DateTime<Utc>], mut exists: F) -> Vec<Gap>
where
    F: FnMut(DateTime<Utc>) -> bool,
{
    let mut gaps = Vec::new();
    let mut missing_start: Option<DateTime<Utc>> = None;

    for &week in week_starts {
        let present = exists(week);
        match (present, missing_start) {
            (false, None) => missing_start = Some(week),
            (true, Some(start)) => {
                gaps.push(Gap { start, end: week });
                missing_start = None;
            }
            _ => {}
        }
    }

    if let (Some(start), Some(&last)) = (missing_start, week_starts.last()) {
        gaps.push(Gap { start, end: last });
    }

    gaps
}
