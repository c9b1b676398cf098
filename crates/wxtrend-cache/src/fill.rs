//! Probe-and-fill for one series.

use std::collections::HashSet;
use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wxtrend_collector::CollectorError;
use wxtrend_core::{find_gaps, week_starts, DateRange, Gap, MalformedPoint, SeriesRecord};
use wxtrend_db::SeriesStore;

use crate::CacheError;

/// Points returned by the collector for one gap, already converted to records
/// where possible.
pub(crate) type Fetched<R> = Vec<(DateTime<Utc>, Result<R, MalformedPoint>)>;

/// Outcome of one fill pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    /// Ranges requested from the collector, in order.
    pub gaps: Vec<Gap>,
    /// Points the collector returned across all gaps.
    pub fetched: usize,
    /// Points written to both stores.
    pub stored: usize,
    /// Malformed points that were not written.
    pub skipped: usize,
    /// Points whose write failed in at least one store.
    pub failed: usize,
}

impl FillReport {
    /// `true` when every week was already stored.
    #[must_use]
    pub fn was_cached(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Probe every week start of `range`, fetch each missing run through `fetch`,
/// and write what comes back.
///
/// Store errors during the probe and collector errors abort the pass. Per-point
/// problems are logged and counted.
pub(crate) async fn fill_gaps<R, D, F, Fut>(
    store: &D,
    key: &R::Key,
    range: DateRange,
    mut fetch: F,
) -> Result<FillReport, CacheError>
where
    R: SeriesRecord,
    D: SeriesStore<R>,
    F: FnMut(Gap) -> Fut,
    Fut: Future<Output = Result<Fetched<R>, CollectorError>>,
{
    let weeks = week_starts(range.start(), range.end());

    let mut present = HashSet::with_capacity(weeks.len());
    for &week in &weeks {
        if store.exists(key, week).await? {
            present.insert(week);
        }
    }
    let gaps = find_gaps(&weeks, |week| present.contains(&week));

    let mut report = FillReport {
        gaps: gaps.clone(),
        ..FillReport::default()
    };

    for gap in gaps {
        tracing::info!(
            kind = R::KIND,
            series = %key,
            start = %gap.start.date_naive(),
            end = %gap.end.date_naive(),
            "fetching missing weeks from collector"
        );
        let points = fetch(gap).await?;
        report.fetched += points.len();

        for (at, point) in points {
            let record = match point {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(series = %key, at = %at, error = %e, "skipping malformed point");
                    report.skipped += 1;
                    continue;
                }
            };
            match store.replace(&record).await {
                Ok(()) => report.stored += 1,
                Err(e) => {
                    tracing::warn!(series = %key, at = %at, error = %e, "failed to store point");
                    report.failed += 1;
                }
            }
        }
    }

    if report.was_cached() {
        tracing::debug!(kind = R::KIND, series = %key, weeks = weeks.len(), "series fully cached");
    } else {
        tracing::info!(
            kind = R::KIND,
            series = %key,
            gaps = report.gaps.len(),
            fetched = report.fetched,
            stored = report.stored,
            skipped = report.skipped,
            failed = report.failed,
            "fill complete"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta};
    use wxtrend_core::{DayBound, TrendKey, TrendRecord};
    use wxtrend_db::MemoryTable;

    use super::*;

    fn week(n: i64) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap().to_midnight() + TimeDelta::days(7 * n)
    }

    fn key() -> TrendKey {
        TrendKey::new("umbrella", "GB")
    }

    #[tokio::test]
    async fn fully_cached_range_never_calls_fetch() {
        let table = MemoryTable::<TrendRecord>::default();
        for n in 0..3 {
            table.replace(&TrendRecord::new(&key(), week(n), 1)).await.unwrap();
        }

        let range = DateRange::new(week(0), week(2)).unwrap();
        let mut calls = 0;
        let report = fill_gaps::<TrendRecord, _, _, _>(&table, &key(), range, |_| {
            calls += 1;
            async { Ok::<Fetched<TrendRecord>, CollectorError>(Vec::new()) }
        })
        .await
        .unwrap();

        assert_eq!(calls, 0);
        assert!(report.was_cached());
        assert_eq!(report, FillReport::default());
    }

    #[tokio::test]
    async fn counts_malformed_points_and_keeps_going() {
        let table = MemoryTable::<TrendRecord>::default();
        let range = DateRange::new(week(0), week(1)).unwrap();

        let report = fill_gaps::<TrendRecord, _, _, _>(&table, &key(), range, |gap| async move {
            Ok::<Fetched<TrendRecord>, CollectorError>(vec![
                (gap.start, Err(MalformedPoint { field: "interest" })),
                (gap.end, Ok(TrendRecord::new(&key(), gap.end, 8))),
            ])
        })
        .await
        .unwrap();

        assert_eq!(
            report.gaps,
            vec![Gap {
                start: week(0),
                end: week(1)
            }]
        );
        assert_eq!(report.fetched, 2);
        assert_eq!(report.stored, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(table.len(), 1);
    }
}
