//! Date normalization and validated ranges.
//!
//! Every timestamp that reaches bucketing or storage is a UTC instant at
//! midnight. Callers may hand in plain dates or full date-times; both are
//! truncated to the start of their day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::CoreError;

/// A value that can be normalized to midnight UTC of its day.
pub trait DayBound {
    fn to_midnight(self) -> DateTime<Utc>;
}

impl DayBound for NaiveDate {
    fn to_midnight(self) -> DateTime<Utc> {
        self.and_time(NaiveTime::MIN).and_utc()
    }
}

impl DayBound for NaiveDateTime {
    fn to_midnight(self) -> DateTime<Utc> {
        self.date().to_midnight()
    }
}

impl DayBound for DateTime<Utc> {
    fn to_midnight(self) -> DateTime<Utc> {
        self.date_naive().to_midnight()
    }
}

/// Inclusive `[start, end]` range with both ends at midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Normalize both bounds and validate ordering.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] if `start` falls on a later day than `end`.
    pub fn new(start: impl DayBound, end: impl DayBound) -> Result<Self, CoreError> {
        let start = start.to_midnight();
        let end = end.to_midnight();
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.date_naive().to_string(),
                end: end.date_naive().to_string(),
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}
