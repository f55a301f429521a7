//! Shared Cache Handle
//!
//! A cloneable, thread-safe front for [`CacheStore`] whose entries are
//! reaped by a background task started at construction.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;

use crate::cache::store::lock_store;
use crate::cache::{CacheStats, CacheStore};
use crate::tasks::{spawn_reaper, ReaperHandle};

// == Cache ==
/// Time-expiring response cache shared between callers and the reaper.
///
/// All access, including eviction passes, goes through one mutex around the
/// whole map. Each critical section is short and never awaits.
///
/// An entry lives between one and two intervals: the reaper runs once per
/// interval and removes entries strictly older than the interval.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Mutex<CacheStore>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and spawns its reaper on the current tokio
    /// runtime.
    ///
    /// The returned handle stops the reaper. Dropping it leaves the reaper
    /// running until every clone of the cache has been dropped.
    ///
    /// A zero interval is accepted: every entry then expires on the next pass.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(interval: Duration) -> (Self, ReaperHandle) {
        let cache = Self::without_reaper(interval);
        let reaper = spawn_reaper(Arc::downgrade(&cache.inner), interval);
        (cache, reaper)
    }

    // == Without Reaper ==
    /// Creates an empty cache with no background eviction.
    ///
    /// Entries are only removed by explicit calls to [`Cache::reap_expired`].
    pub fn without_reaper(interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheStore::new(interval))),
        }
    }

    // == Put ==
    /// Inserts or replaces the payload stored under `key`.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        lock_store(&self.inner).put(key, value);
    }

    // == Get ==
    /// Returns the payload stored under `key`, or `None` if absent.
    ///
    /// The returned bytes are an immutable snapshot; later writes to the
    /// same key never affect it.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        lock_store(&self.inner).get(key)
    }

    // == Reap Expired ==
    /// Runs one eviction pass immediately, returning the number removed.
    pub fn reap_expired(&self) -> usize {
        lock_store(&self.inner).reap_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        lock_store(&self.inner).stats()
    }

    // == Interval ==
    /// Returns the configured entry lifetime.
    pub fn interval(&self) -> Duration {
        lock_store(&self.inner).interval()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        lock_store(&self.inner).len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        lock_store(&self.inner).is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[tokio::test]
    async fn test_roundtrip() {
        let (cache, reaper) = Cache::new(Duration::from_secs(5));

        cache.put("https://example.test/a", b"payload".to_vec());

        assert_eq!(
            cache.get("https://example.test/a"),
            Some(Bytes::from_static(b"payload"))
        );
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_miss() {
        let (cache, reaper) = Cache::new(Duration::from_secs(5));

        assert_eq!(cache.get("never-inserted"), None);
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_overwrite_last_write_wins() {
        let (cache, reaper) = Cache::new(Duration::from_secs(5));

        cache.put("k", "v1");
        cache.put("k", "v2");

        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"v2")));
        assert_eq!(cache.len(), 1);
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_returned_value_is_a_snapshot() {
        let (cache, reaper) = Cache::new(Duration::from_secs(5));

        cache.put("k", "first");
        let snapshot = cache.get("k").unwrap();
        cache.put("k", "second");

        assert_eq!(snapshot, Bytes::from_static(b"first"));
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_expiry() {
        let (cache, reaper) = Cache::new(Duration::from_millis(50));

        cache.put("x", "value");
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.get("x"), None);
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_freshness_window() {
        let (cache, reaper) = Cache::new(Duration::from_millis(100));

        cache.put("y", "value");

        assert!(cache.get("y").is_some());
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_independent_keys() {
        let (cache, reaper) = Cache::new(Duration::from_millis(50));

        cache.put("a", "old");
        tokio::time::sleep(Duration::from_millis(70)).await;
        cache.put("b", "fresh");
        cache.reap_expired();

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(Bytes::from_static(b"fresh")));
        reaper.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_writers_and_readers() {
        const WRITERS: usize = 4;
        const READERS: usize = 4;
        const PUTS: usize = 1000;

        // Long interval so nothing written during the test is evicted
        let (cache, reaper) = Cache::new(Duration::from_secs(30));

        thread::scope(|scope| {
            for writer in 0..WRITERS {
                let cache = cache.clone();
                scope.spawn(move || {
                    for i in 0..PUTS {
                        cache.put(format!("w{writer}-{i}"), format!("{writer}:{i}"));
                    }
                });
            }
            for reader in 0..READERS {
                let cache = cache.clone();
                scope.spawn(move || {
                    for i in 0..PUTS {
                        if let Some(value) = cache.get(&format!("w{reader}-{i}")) {
                            assert_eq!(value, Bytes::from(format!("{reader}:{i}")));
                        }
                        cache.reap_expired();
                    }
                });
            }
        });

        assert_eq!(cache.len(), WRITERS * PUTS);
        for writer in 0..WRITERS {
            for i in 0..PUTS {
                assert_eq!(
                    cache.get(&format!("w{writer}-{i}")),
                    Some(Bytes::from(format!("{writer}:{i}")))
                );
            }
        }
        reaper.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_access_with_active_reaper() {
        let (cache, reaper) = Cache::new(Duration::from_millis(5));

        thread::scope(|scope| {
            for writer in 0..4 {
                let cache = cache.clone();
                scope.spawn(move || {
                    for i in 0..1000 {
                        let key = format!("w{writer}-{i}");
                        cache.put(key.clone(), "value");
                        if let Some(value) = cache.get(&key) {
                            assert_eq!(value, Bytes::from_static(b"value"));
                        }
                    }
                });
            }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(cache.is_empty());
        assert!(cache.stats().evictions > 0);
        reaper.shutdown().await;
    }

    #[test]
    fn test_without_reaper_keeps_entries_until_reaped() {
        let cache = Cache::without_reaper(Duration::from_millis(10));

        cache.put("k", "v");
        thread::sleep(Duration::from_millis(20));
        assert!(cache.get("k").is_some());

        assert_eq!(cache.reap_expired(), 1);
        assert!(cache.get("k").is_none());
        assert_eq!(cache.interval(), Duration::from_millis(10));
    }
}
