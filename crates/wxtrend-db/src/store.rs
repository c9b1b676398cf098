//! The storage capability shared by every backing store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wxtrend_core::SeriesRecord;

use crate::DbError;

/// Natural-key storage for one record kind.
///
/// Implementations hold at most one record per `(key, observed_at)`.
#[async_trait]
pub trait SeriesStore<R: SeriesRecord>: Send + Sync {
    /// Whether a record exists for `key` at exactly `at`.
    async fn exists(&self, key: &R::Key, at: DateTime<Utc>) -> Result<bool, DbError>;

    /// Replace whatever is stored under the record's natural key with `record`.
    async fn replace(&self, record: &R) -> Result<(), DbError>;

    /// Records for `key` with `start <= observed_at <= end`, oldest first.
    async fn query_range(
        &self,
        key: &R::Key,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<R>, DbError>;

    /// Delete every record of this kind. Returns the number removed.
    async fn clear(&self) -> Result<u64, DbError>;
}
