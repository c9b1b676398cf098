//! Database operations for the `weather_points` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wxtrend_core::{WeatherKey, WeatherRecord};

use super::PgStore;
use crate::store::SeriesStore;
use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `weather_points` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeatherPointRow {
    pub id: i64,
    pub geo_code: String,
    pub observed_at: DateTime<Utc>,
    pub temperature: i32,
    pub description: String,
    pub precipitation: f64,
    pub sunshine: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WeatherPointRow> for WeatherRecord {
    fn from(row: WeatherPointRow) -> Self {
        Self {
            geo_code: row.geo_code,
            observed_at: row.observed_at,
            temperature: row.temperature,
            description: row.description,
            precipitation: row.precipitation,
            sunshine: row.sunshine,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[async_trait]
impl SeriesStore<WeatherRecord> for PgStore {
    async fn exists(&self, key: &WeatherKey, at: DateTime<Utc>) -> Result<bool, DbError> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS ( \
                 SELECT 1 FROM weather_points \
                 WHERE geo_code = $1 AND observed_at = $2 \
             )",
        )
        .bind(&key.geo_code)
        .bind(at)
        .fetch_one(self.pool())
        .await?;

        Ok(found)
    }

    /// Upserts on `(geo_code, observed_at)`; the old payload is overwritten.
    async fn replace(&self, record: &WeatherRecord) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO weather_points \
                 (geo_code, observed_at, temperature, description, precipitation, sunshine) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (geo_code, observed_at) DO UPDATE SET \
                 temperature   = EXCLUDED.temperature, \
                 description   = EXCLUDED.description, \
                 precipitation = EXCLUDED.precipitation, \
                 sunshine      = EXCLUDED.sunshine, \
                 updated_at    = NOW()",
        )
        .bind(&record.geo_code)
        .bind(record.observed_at)
        .bind(record.temperature)
        .bind(&record.description)
        .bind(record.precipitation)
        .bind(record.sunshine)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn query_range(
        &self,
        key: &WeatherKey,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WeatherRecord>, DbError> {
        let rows = sqlx::query_as::<_, WeatherPointRow>(
            "SELECT id, geo_code, observed_at, temperature, description, precipitation, \
                    sunshine, created_at, updated_at \
             FROM weather_points \
             WHERE geo_code = $1 AND observed_at >= $2 AND observed_at <= $3 \
             ORDER BY observed_at",
        )
        .bind(&key.geo_code)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(WeatherRecord::from).collect())
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let rows_affected = sqlx::query("DELETE FROM weather_points")
            .execute(self.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
