//! Primary/secondary store composition.
//!
//! [`DualStore`] wraps two implementations of the same storage capability and
//! is itself a [`SeriesStore`]:
//!
//! - reads go to the primary first and fall back to the secondary when the
//!   primary has nothing (or cannot be reached);
//! - writes go to both, independently, with no cross-store rollback.
//!
//! Range reads are either/or. A non-empty primary result is returned as-is even
//! when the secondary holds more of the range.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wxtrend_core::SeriesRecord;

use crate::locks::KeyedLocks;
use crate::store::SeriesStore;
use crate::DbError;

/// Two backing stores behind one storage handle.
#[derive(Debug)]
pub struct DualStore<P, S> {
    primary: P,
    secondary: S,
    write_locks: KeyedLocks<(String, DateTime<Utc>)>,
}

impl<P, S> DualStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            write_locks: KeyedLocks::new(),
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

#[async_trait]
impl<R, P, S> SeriesStore<R> for DualStore<P, S>
where
    R: SeriesRecord,
    P: SeriesStore<R>,
    S: SeriesStore<R>,
{
    /// Present in either store. The secondary is only consulted when the
    /// primary reports absent or fails; its error is returned as is.
    async fn exists(&self, key: &R::Key, at: DateTime<Utc>) -> Result<bool, DbError> {
        match self.primary.exists(key, at).await {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    series = %key,
                    at = %at,
                    error = %e,
                    "primary store unreachable during existence check; asking secondary"
                );
            }
        }
        self.secondary.exists(key, at).await
    }

    /// Replace in both stores. Replaces for the same `(key, at)` are
    /// serialized.
    async fn replace(&self, record: &R) -> Result<(), DbError> {
        let key = record.key();
        let at = record.observed_at();
        let _guard = self.write_locks.acquire((key.to_string(), at)).await;

        let primary = self.primary.replace(record).await;
        let secondary = self.secondary.replace(record).await;

        match (primary, secondary) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(primary_err), Err(secondary_err)) => {
                tracing::warn!(
                    series = %key,
                    at = %at,
                    error = %secondary_err,
                    "secondary store write failed alongside primary"
                );
                Err(primary_err)
            }
            (Err(e), Ok(())) => Err(DbError::PartialWrite {
                store: "primary",
                source: Box::new(e),
            }),
            (Ok(()), Err(e)) => Err(DbError::PartialWrite {
                store: "secondary",
                source: Box::new(e),
            }),
        }
    }

    async fn query_range(
        &self,
        key: &R::Key,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<R>, DbError> {
        match self.primary.query_range(key, start, end).await {
            Ok(rows) if !rows.is_empty() => return Ok(rows),
            Ok(_) => {
                tracing::debug!(series = %key, "primary store empty for range; reading secondary");
            }
            Err(e) => {
                tracing::warn!(
                    series = %key,
                    error = %e,
                    "primary store unreachable for range read; reading secondary"
                );
            }
        }
        self.secondary.query_range(key, start, end).await
    }

    /// Clears both stores; returns the primary's count.
    async fn clear(&self) -> Result<u64, DbError> {
        let primary = self.primary.clear().await;
        let secondary = self.secondary.clear().await;
        let removed = primary?;
        secondary?;
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "dual_test.rs"]
mod tests;
