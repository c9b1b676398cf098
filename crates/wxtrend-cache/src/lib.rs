//! Read-through cache over the dual store and the collector.
//!
//! Callers ask for a series over a date range. Missing weeks are fetched from
//! the collector and written to both stores before the range is read back.

pub mod cache;
pub mod fill;

use thiserror::Error;
use wxtrend_collector::CollectorError;
use wxtrend_core::CoreError;
use wxtrend_db::DbError;

pub use cache::{TimeSeriesCache, WeatherAndTrends};
pub use fill::FillReport;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("store error: {0}")]
    Db(#[from] DbError),

    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),
}
