//! Collector service response types.
//!
//! Both endpoints answer with a `{"points": [...]}` body. Point timestamps are
//! RFC 3339; the client truncates them to midnight UTC before handing them on.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use wxtrend_core::RawWeather;

/// Top-level body shared by the `weather` and `trends` endpoints.
#[derive(Debug, Deserialize)]
pub struct PointsResponse<T> {
    #[serde(default = "Vec::new")]
    pub points: Vec<T>,
}

/// One weather observation as sent by the collector.
///
/// Every measurement is optional on the wire; incomplete points are passed
/// through so the cache can decide what to skip.
#[derive(Debug, Deserialize)]
pub struct WeatherPoint {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(default)]
    pub sun: Option<f64>,
}

impl WeatherPoint {
    /// Temperatures are stored in whole degrees; fractional readings are
    /// rounded.
    #[must_use]
    pub fn into_raw(self) -> RawWeather {
        #[allow(clippy::cast_possible_truncation)]
        let temperature = self.temp.map(|t| t.round() as i32);
        RawWeather {
            temperature,
            description: self.desc,
            precipitation: self.precip,
            sunshine: self.sun,
        }
    }
}

/// One search-interest value as sent by the collector.
#[derive(Debug, Deserialize)]
pub struct TrendPoint {
    pub time: DateTime<Utc>,
    pub interest: i32,
}
