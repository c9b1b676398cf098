//! Client for the external data-collection service.
//!
//! The collector scrapes weather observations and search-interest series on
//! demand. This crate only consumes its HTTP interface; [`Collector`] is the
//! seam the cache depends on so tests can substitute a fake.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wxtrend_core::RawWeather;

pub use client::HttpCollector;
pub use error::CollectorError;

/// Fetches raw series data for an inclusive date range.
///
/// Returned maps are keyed by midnight UTC and may hold any subset of the
/// requested dates.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Weather observations for a free-form location query such as
    /// `"Seattle, WA"`.
    async fn fetch_weather(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: &str,
    ) -> Result<BTreeMap<DateTime<Utc>, RawWeather>, CollectorError>;

    /// Search-interest values for `keyword` in the region `geo_code`.
    async fn fetch_trends(
        &self,
        keyword: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        geo_code: &str,
    ) -> Result<BTreeMap<DateTime<Utc>, i32>, CollectorError>;
}
