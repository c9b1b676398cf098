//! Per-key async mutual exclusion.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A set of async locks, one per key, created on demand.
///
/// Idle entries are pruned on the next acquisition so the map only holds keys
/// that are locked or being waited on.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    inner: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash> KeyedLocks<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Access ends when the guard drops.
    pub async fn acquire(&self, key: K) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(map.entry(key).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_key_is_serialized() {
        let locks = Arc::new(KeyedLocks::<&'static str>::new());
        let in_section = Arc::new(AtomicU32::new(0));
        let overlaps = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let in_section = Arc::clone(&in_section);
            let overlaps = Arc::clone(&overlaps);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("GB").await;
                if in_section.fetch_add(1, Ordering::SeqCst) > 0 {
                    overlaps.fetch_add(1, Ordering::SeqCst);
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_section.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn different_keys_do_not_block_each_other() {
        let locks = KeyedLocks::new();
        let _gb = locks.acquire("GB").await;
        let nl = tokio::time::timeout(Duration::from_millis(50), locks.acquire("NL")).await;
        assert!(nl.is_ok(), "NL should not wait on GB");
    }

    #[tokio::test]
    async fn idle_keys_are_pruned() {
        let locks = KeyedLocks::new();
        drop(locks.acquire("GB").await);
        drop(locks.acquire("NL").await);
        // Acquiring prunes every idle entry except the one being taken.
        let _es = locks.acquire("ES").await;
        assert_eq!(locks.len(), 1);
    }
}
