//! Cache Module
//!
//! Provides the time-expiring response cache: raw payloads keyed by request
//! URL, evicted by a background reaper once older than the cache interval.
//!
//! The cache has no size bound. Growth is limited only by how many distinct
//! keys are written within one or two intervals.

mod entry;
mod shared;
mod stats;
pub(crate) mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
