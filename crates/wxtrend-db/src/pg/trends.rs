//! Database operations for the `trend_points` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wxtrend_core::{TrendKey, TrendRecord};

use super::PgStore;
use crate::store::SeriesStore;
use crate::DbError;

/// A row from the `trend_points` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendPointRow {
    pub id: i64,
    pub keyword: String,
    pub geo_code: String,
    pub observed_at: DateTime<Utc>,
    pub interest: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TrendPointRow> for TrendRecord {
    fn from(row: TrendPointRow) -> Self {
        Self {
            keyword: row.keyword,
            geo_code: row.geo_code,
            observed_at: row.observed_at,
            interest: row.interest,
        }
    }
}

#[async_trait]
impl SeriesStore<TrendRecord> for PgStore {
    async fn exists(&self, key: &TrendKey, at: DateTime<Utc>) -> Result<bool, DbError> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS ( \
                 SELECT 1 FROM trend_points \
                 WHERE keyword = $1 AND geo_code = $2 AND observed_at = $3 \
             )",
        )
        .bind(&key.keyword)
        .bind(&key.geo_code)
        .bind(at)
        .fetch_one(self.pool())
        .await?;

        Ok(found)
    }

    async fn replace(&self, record: &TrendRecord) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO trend_points (keyword, geo_code, observed_at, interest) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (keyword, geo_code, observed_at) DO UPDATE SET \
                 interest   = EXCLUDED.interest, \
                 updated_at = NOW()",
        )
        .bind(&record.keyword)
        .bind(&record.geo_code)
        .bind(record.observed_at)
        .bind(record.interest)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn query_range(
        &self,
        key: &TrendKey,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TrendRecord>, DbError> {
        let rows = sqlx::query_as::<_, TrendPointRow>(
            "SELECT id, keyword, geo_code, observed_at, interest, created_at, updated_at \
             FROM trend_points \
             WHERE keyword = $1 AND geo_code = $2 \
               AND observed_at >= $3 AND observed_at <= $4 \
             ORDER BY observed_at",
        )
        .bind(&key.keyword)
        .bind(&key.geo_code)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(TrendRecord::from).collect())
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let rows_affected = sqlx::query("DELETE FROM trend_points")
            .execute(self.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
