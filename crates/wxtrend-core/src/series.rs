//! Series record kinds and their natural keys.

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored point of some series kind.
///
/// A record is identified by its series key plus its timestamp; stores hold at
/// most one record per pair.
pub trait SeriesRecord: Clone + fmt::Debug + Send + Sync + 'static {
    /// Discriminators identifying the series, excluding time.
    type Key: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Short name of the record kind, used in logs and lock keys.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;

    fn observed_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeatherKey {
    pub geo_code: String,
}

impl WeatherKey {
    pub fn new(geo_code: impl Into<String>) -> Self {
        Self {
            geo_code: geo_code.into(),
        }
    }
}

impl fmt::Display for WeatherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weather/{}", self.geo_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendKey {
    pub keyword: String,
    pub geo_code: String,
}

impl TrendKey {
    pub fn new(keyword: impl Into<String>, geo_code: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            geo_code: geo_code.into(),
        }
    }
}

impl fmt::Display for TrendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trend/{}/{}", self.geo_code, self.keyword)
    }
}

/// Weekly weather observation for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub geo_code: String,
    pub observed_at: DateTime<Utc>,
    pub temperature: i32,
    pub description: String,
    pub precipitation: f64,
    pub sunshine: f64,
}

impl SeriesRecord for WeatherRecord {
    type Key = WeatherKey;
    const KIND: &'static str = "weather";

    fn key(&self) -> WeatherKey {
        WeatherKey::new(self.geo_code.clone())
    }

    fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// Weekly search-interest score for a keyword in a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub keyword: String,
    pub geo_code: String,
    pub observed_at: DateTime<Utc>,
    pub interest: i32,
}

impl TrendRecord {
    #[must_use]
    pub fn new(key: &TrendKey, observed_at: DateTime<Utc>, interest: i32) -> Self {
        Self {
            keyword: key.keyword.clone(),
            geo_code: key.geo_code.clone(),
            observed_at,
            interest,
        }
    }
}

impl SeriesRecord for TrendRecord {
    type Key = TrendKey;
    const KIND: &'static str = "trend";

    fn key(&self) -> TrendKey {
        TrendKey::new(self.keyword.clone(), self.geo_code.clone())
    }

    fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// Weather payload as handed back by a collector; any field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWeather {
    pub temperature: Option<i32>,
    pub description: Option<String>,
    pub precipitation: Option<f64>,
    pub sunshine: Option<f64>,
}

/// A collected point that cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field `{field}`")]
pub struct MalformedPoint {
    pub field: &'static str,
}

impl RawWeather {
    /// Validate the payload and attach it to a series key and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPoint`] naming the first absent field; temperature is
    /// checked first.
    pub fn into_record(
        self,
        key: &WeatherKey,
        observed_at: DateTime<Utc>,
    ) -> Result<WeatherRecord, MalformedPoint> {
        let temperature = self.temperature.ok_or(MalformedPoint {
            field: "temperature",
        })?;
        let description = self.description.ok_or(MalformedPoint {
            field: "description",
        })?;
        let precipitation = self.precipitation.ok_or(MalformedPoint {
            field: "precipitation",
        })?;
        let sunshine = self.sunshine.ok_or(MalformedPoint { field: "sunshine" })?;

        Ok(WeatherRecord {
            geo_code: key.geo_code.clone(),
            observed_at,
            temperature,
            description,
            precipitation,
            sunshine,
        })
    }
}
