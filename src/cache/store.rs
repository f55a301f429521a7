//! Cache Store Module
//!
//! The unsynchronized map of entries. Thread-safe access goes through
//! [`Cache`](crate::cache::Cache), which wraps a store in a single mutex.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-value storage with age-based expiry.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum age an entry may reach before it is reaped
    interval: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            interval,
        }
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    pub fn put(&mut self, key: String, value: Bytes) {
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the stored payload for `key`, if present.
    ///
    /// Expiry is left to the reaper, so an entry past its age that has not
    /// been reaped yet is still returned. Lookups never refresh the timestamp.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap Expired ==
    /// Removes every entry older than the store interval.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&mut self) -> usize {
        let now = Instant::now();
        let interval = self.interval;
        let before = self.entries.len();

        self.entries.retain(|key, entry| {
            let expired = entry.is_expired_at(now, interval);
            if expired {
                debug!(key = %key, age_ms = entry.age().as_millis() as u64, "Evicted cache entry");
            }
            !expired
        });

        let removed = before - self.entries.len();
        self.stats.record_evictions(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Interval ==
    /// Returns the maximum age an entry may reach.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Locking ==
/// Locks a shared store, recovering from poisoning.
///
/// Every critical section leaves the map consistent before it can panic, so
/// a poisoned guard still holds a valid store.
pub(crate) fn lock_store(store: &Mutex<CacheStore>) -> MutexGuard<'_, CacheStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn bytes(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(Duration::from_secs(5));

        store.put("key1".to_string(), bytes("value1"));

        assert_eq!(store.get("key1"), Some(bytes("value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(Duration::from_secs(5));

        assert_eq!(store.get("nonexistent"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(Duration::from_secs(5));

        store.put("key1".to_string(), bytes("value1"));
        store.put("key1".to_string(), bytes("value2"));

        assert_eq!(store.get("key1"), Some(bytes("value2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_empty_payload() {
        let mut store = CacheStore::new(Duration::from_secs(5));

        store.put("empty".to_string(), Bytes::new());

        assert_eq!(store.get("empty"), Some(Bytes::new()));
    }

    #[test]
    fn test_get_does_not_refresh_age() {
        let mut store = CacheStore::new(Duration::from_millis(30));

        store.put("key".to_string(), bytes("value"));
        sleep(Duration::from_millis(20));
        assert!(store.get("key").is_some());
        sleep(Duration::from_millis(20));

        assert_eq!(store.reap_expired(), 1);
        assert_eq!(store.get("key"), None);
    }

    #[test]
    fn test_overwrite_resets_age() {
        let mut store = CacheStore::new(Duration::from_millis(30));

        store.put("key".to_string(), bytes("old"));
        sleep(Duration::from_millis(20));
        store.put("key".to_string(), bytes("new"));
        sleep(Duration::from_millis(20));

        assert_eq!(store.reap_expired(), 0);
        assert_eq!(store.get("key"), Some(bytes("new")));
    }

    #[test]
    fn test_reap_expired_keeps_fresh_entries() {
        let mut store = CacheStore::new(Duration::from_millis(30));

        store.put("a".to_string(), bytes("old"));
        sleep(Duration::from_millis(45));
        store.put("b".to_string(), bytes("fresh"));

        let removed = store.reap_expired();

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(bytes("fresh")));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(Duration::from_millis(10));

        store.put("key1".to_string(), bytes("value1"));
        store.get("key1");
        store.get("nonexistent");
        sleep(Duration::from_millis(20));
        store.reap_expired();

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_lock_store_recovers_from_poison() {
        let store = std::sync::Arc::new(Mutex::new(CacheStore::new(Duration::from_secs(5))));

        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let mut guard = poisoner.lock().unwrap();
            guard.put("key".to_string(), bytes("value"));
            panic!("poison the lock");
        })
        .join();

        assert!(store.is_poisoned());
        assert_eq!(lock_store(&store).get("key"), Some(bytes("value")));
    }
}
