//! HTTP client for the collector service.
//!
//! Wraps `reqwest` with retry, typed response deserialization, and the
//! date/timestamp conventions the cache expects. Dates go out as
//! `YYYY-MM-DD`; timestamps come back truncated to midnight UTC.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use wxtrend_core::{AppConfig, DayBound, RawWeather};

use crate::error::CollectorError;
use crate::retry::RetryPolicy;
use crate::types::{PointsResponse, TrendPoint, WeatherPoint};
use crate::Collector;

const DEFAULT_USER_AGENT: &str = "wxtrend/0.1 (series-cache)";

/// Client for the collector's REST interface.
///
/// Use [`HttpCollector::from_app_config`] in the binary or
/// [`HttpCollector::with_base_url`] to point at a mock server in tests.
#[derive(Debug)]
pub struct HttpCollector {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpCollector {
    /// Creates a client with the given timeout, user agent, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CollectorError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `join` append the endpoint instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CollectorError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            retry: RetryPolicy {
                max_retries,
                backoff_base_ms,
            },
        })
    }

    /// Test constructor: default user agent, no retries.
    ///
    /// # Errors
    ///
    /// Same as [`HttpCollector::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, CollectorError> {
        Self::new(base_url, timeout_secs, DEFAULT_USER_AGENT, 0, 0)
    }

    /// # Errors
    ///
    /// Same as [`HttpCollector::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CollectorError> {
        Self::new(
            &config.collector_url,
            config.collector_timeout_secs,
            &config.collector_user_agent,
            config.collector_max_retries,
            config.collector_retry_backoff_base_ms,
        )
    }

    /// Builds `{base}/{endpoint}?k=v&...` with percent-encoded values.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, CollectorError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| CollectorError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request with retry, asserts a 2xx status, and parses the
    /// body into `T`.
    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CollectorError> {
        let client = &self.client;
        let body = self
            .retry
            .run(move || async move {
                let response = client.get(url.clone()).send().await?;
                let response = response.error_for_status()?;
                Ok::<_, CollectorError>(response.text().await?)
            })
            .await?;

        serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

fn format_day(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl Collector for HttpCollector {
    async fn fetch_weather(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: &str,
    ) -> Result<BTreeMap<DateTime<Utc>, RawWeather>, CollectorError> {
        let (start, end) = (format_day(start), format_day(end));
        let url = self.build_url(
            "weather",
            &[("location", location), ("start", &start), ("end", &end)],
        )?;
        let response: PointsResponse<WeatherPoint> = self.request_json(&url).await?;

        tracing::debug!(
            location,
            start = %start,
            end = %end,
            points = response.points.len(),
            "collector returned weather points"
        );
        Ok(response
            .points
            .into_iter()
            .map(|p| (p.time.to_midnight(), p.into_raw()))
            .collect())
    }

    async fn fetch_trends(
        &self,
        keyword: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        geo_code: &str,
    ) -> Result<BTreeMap<DateTime<Utc>, i32>, CollectorError> {
        let (start, end) = (format_day(start), format_day(end));
        let url = self.build_url(
            "trends",
            &[
                ("keyword", keyword),
                ("geo", geo_code),
                ("start", &start),
                ("end", &end),
            ],
        )?;
        let response: PointsResponse<TrendPoint> = self.request_json(&url).await?;

        tracing::debug!(
            keyword,
            geo_code,
            start = %start,
            end = %end,
            points = response.points.len(),
            "collector returned trend points"
        );
        Ok(response
            .points
            .into_iter()
            .map(|p| (p.time.to_midnight(), p.interest))
            .collect())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
