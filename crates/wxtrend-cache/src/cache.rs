//! The read-through series cache.

use serde::Serialize;
use wxtrend_collector::{Collector, CollectorError};
use wxtrend_core::{
    DateRange, DayBound, Location, TrendKey, TrendRecord, WeatherKey, WeatherRecord,
};
use wxtrend_db::{KeyedLocks, SeriesStore};

use crate::fill::{fill_gaps, Fetched, FillReport};
use crate::CacheError;

/// Weather and search interest for one location over the same range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAndTrends {
    pub weather: Vec<WeatherRecord>,
    pub trends: Vec<TrendRecord>,
}

/// Serves weekly series from the store, filling missing weeks from the
/// collector first.
///
/// Concurrent requests for the same series queue behind one another for the
/// probe-and-fill step, so a run of identical requests triggers at most one
/// fetch per gap. Requests for different series proceed independently.
#[derive(Debug)]
pub struct TimeSeriesCache<D, C> {
    store: D,
    collector: C,
    fill_gates: KeyedLocks<String>,
}

impl<D, C> TimeSeriesCache<D, C> {
    pub fn new(store: D, collector: C) -> Self {
        Self {
            store,
            collector,
            fill_gates: KeyedLocks::new(),
        }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn collector(&self) -> &C {
        &self.collector
    }
}

impl<D, C> TimeSeriesCache<D, C>
where
    D: SeriesStore<WeatherRecord> + SeriesStore<TrendRecord>,
    C: Collector,
{
    /// Weekly weather for `location` between `start` and `end` inclusive.
    ///
    /// Records are stored under the location's geo code; the collector is
    /// asked with the location's free-form weather query.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Core`] if `start` is after `end`.
    /// - [`CacheError::Db`] if neither store can answer a probe or the read.
    /// - [`CacheError::Collector`] if a fetch for a missing range fails.
    pub async fn get_weather(
        &self,
        location: &Location,
        start: impl DayBound,
        end: impl DayBound,
    ) -> Result<Vec<WeatherRecord>, CacheError> {
        let range = DateRange::new(start, end)?;
        self.fill_weather(location, range).await?;

        let key = location.weather_key();
        let records = SeriesStore::<WeatherRecord>::query_range(
            &self.store,
            &key,
            range.start(),
            range.end(),
        )
        .await?;
        Ok(records)
    }

    /// Weekly search interest for `keyword` in `geo_code` between `start`
    /// and `end` inclusive.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeriesCache::get_weather`].
    pub async fn get_trends(
        &self,
        keyword: &str,
        geo_code: &str,
        start: impl DayBound,
        end: impl DayBound,
    ) -> Result<Vec<TrendRecord>, CacheError> {
        let range = DateRange::new(start, end)?;
        self.read_trends(&TrendKey::new(keyword, geo_code), range).await
    }

    /// Both series for one location, filled concurrently.
    ///
    /// # Errors
    ///
    /// Fails if either series fails; see [`TimeSeriesCache::get_weather`].
    pub async fn get_weather_and_trends(
        &self,
        location: &Location,
        keyword: &str,
        start: impl DayBound,
        end: impl DayBound,
    ) -> Result<WeatherAndTrends, CacheError> {
        let range = DateRange::new(start, end)?;
        let trend_key = location.trend_key(keyword);
        let (weather, trends) = tokio::try_join!(
            self.get_weather(location, range.start(), range.end()),
            self.read_trends(&trend_key, range),
        )?;
        Ok(WeatherAndTrends { weather, trends })
    }

    async fn read_trends(
        &self,
        key: &TrendKey,
        range: DateRange,
    ) -> Result<Vec<TrendRecord>, CacheError> {
        self.fill_trends(key, range).await?;
        let records =
            SeriesStore::<TrendRecord>::query_range(&self.store, key, range.start(), range.end())
                .await?;
        Ok(records)
    }

    /// Probe and fill the weather series without reading it back.
    ///
    /// # Errors
    ///
    /// [`CacheError::Db`] on a failed probe, [`CacheError::Collector`] on a
    /// failed fetch.
    pub async fn fill_weather(
        &self,
        location: &Location,
        range: DateRange,
    ) -> Result<FillReport, CacheError> {
        let key = location.weather_key();
        let _gate = self.fill_gates.acquire(key.to_string()).await;

        let collector = &self.collector;
        let query = location.weather_query.as_str();
        let record_key: &WeatherKey = &key;
        fill_gaps::<WeatherRecord, _, _, _>(&self.store, &key, range, move |gap| async move {
            let points = collector.fetch_weather(gap.start, gap.end, query).await?;
            Ok::<Fetched<WeatherRecord>, CollectorError>(
                points
                    .into_iter()
                    .map(|(at, raw)| (at, raw.into_record(record_key, at)))
                    .collect(),
            )
        })
        .await
    }

    /// Probe and fill one trend series without reading it back.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeriesCache::fill_weather`].
    pub async fn fill_trends(
        &self,
        key: &TrendKey,
        range: DateRange,
    ) -> Result<FillReport, CacheError> {
        let _gate = self.fill_gates.acquire(key.to_string()).await;

        let collector = &self.collector;
        fill_gaps::<TrendRecord, _, _, _>(&self.store, key, range, move |gap| async move {
            let points = collector
                .fetch_trends(&key.keyword, gap.start, gap.end, &key.geo_code)
                .await?;
            Ok::<Fetched<TrendRecord>, CollectorError>(
                points
                    .into_iter()
                    .map(|(at, interest)| (at, Ok(TrendRecord::new(key, at, interest))))
                    .collect(),
            )
        })
        .await
    }
}
