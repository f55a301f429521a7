//! Cache Entry Module
//!
//! Defines the immutable record stored for each cached response.

use std::time::{Duration, Instant};

use bytes::Bytes;

// == Cache Entry ==
/// A single cached payload stamped with its insertion time.
///
/// Entries are never mutated once stored. Re-inserting a key replaces the
/// whole entry, which also resets its age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw response body
    pub value: Bytes,
    /// Monotonic insertion timestamp
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Returns how long ago the entry was created.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `interval` at instant `now`.
    ///
    /// The comparison is strict: an entry whose age equals the interval
    /// exactly is still considered fresh.
    pub fn is_expired_at(&self, now: Instant, interval: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > interval
    }

    /// Checks whether the entry is older than `interval` right now.
    pub fn is_expired(&self, interval: Duration) -> bool {
        self.is_expired_at(Instant::now(), interval)
    }
}
