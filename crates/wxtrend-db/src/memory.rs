//! In-process store holding both series kinds.
//!
//! Used as a stand-in backing store in tests and local runs. A store can be
//! switched offline to behave like an unreachable database.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wxtrend_core::{SeriesRecord, TrendKey, TrendRecord, WeatherKey, WeatherRecord};

use crate::store::SeriesStore;
use crate::DbError;

/// Records of one kind, indexed by series key then timestamp.
#[derive(Debug)]
pub struct MemoryTable<R: SeriesRecord> {
    rows: RwLock<HashMap<R::Key, BTreeMap<DateTime<Utc>, R>>>,
}

impl<R: SeriesRecord> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<R: SeriesRecord> MemoryTable<R> {
    /// Total records across all series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(BTreeMap::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<R: SeriesRecord> SeriesStore<R> for MemoryTable<R> {
    async fn exists(&self, key: &R::Key, at: DateTime<Utc>) -> Result<bool, DbError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.get(key).is_some_and(|series| series.contains_key(&at)))
    }

    async fn replace(&self, record: &R) -> Result<(), DbError> {
        // Delete and insert happen under one write lock.
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        rows.entry(record.key())
            .or_default()
            .insert(record.observed_at(), record.clone());
        Ok(())
    }

    async fn query_range(
        &self,
        key: &R::Key,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<R>, DbError> {
        if start > end {
            return Ok(Vec::new());
        }
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .get(key)
            .map(|series| series.range(start..=end).map(|(_, r)| r.clone()).collect())
            .unwrap_or_default())
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let removed = rows.values().map(BTreeMap::len).sum::<usize>();
        rows.clear();
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

/// Weather and trend tables behind one handle.
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    offline: AtomicBool,
    pub weather: MemoryTable<WeatherRecord>,
    pub trends: MemoryTable<TrendRecord>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offline: AtomicBool::new(false),
            weather: MemoryTable::default(),
            trends: MemoryTable::default(),
        }
    }

    /// While offline every operation fails with [`DbError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), DbError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable {
                store: self.name.clone(),
                reason: "store is offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SeriesStore<WeatherRecord> for MemoryStore {
    async fn exists(&self, key: &WeatherKey, at: DateTime<Utc>) -> Result<bool, DbError> {
        self.check_online()?;
        self.weather.exists(key, at).await
    }

    async fn replace(&self, record: &WeatherRecord) -> Result<(), DbError> {
        self.check_online()?;
        self.weather.replace(record).await
    }

    async fn query_range(
        &self,
        key: &WeatherKey,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WeatherRecord>, DbError> {
        self.check_online()?;
        self.weather.query_range(key, start, end).await
    }

    async fn clear(&self) -> Result<u64, DbError> {
        self.check_online()?;
        SeriesStore::<WeatherRecord>::clear(&self.weather).await
    }
}

#[async_trait]
impl SeriesStore<TrendRecord> for MemoryStore {
    async fn exists(&self, key: &TrendKey, at: DateTime<Utc>) -> Result<bool, DbError> {
        self.check_online()?;
        self.trends.exists(key, at).await
    }

    async fn replace(&self, record: &TrendRecord) -> Result<(), DbError> {
        self.check_online()?;
        self.trends.replace(record).await
    }

    async fn query_range(
        &self,
        key: &TrendKey,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TrendRecord>, DbError> {
        self.check_online()?;
        self.trends.query_range(key, start, end).await
    }

    async fn clear(&self) -> Result<u64, DbError> {
        self.check_online()?;
        SeriesStore::<TrendRecord>::clear(&self.trends).await
    }
}
