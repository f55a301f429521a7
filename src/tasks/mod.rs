//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: Removes entries older than the cache interval, once per interval

mod reaper;

pub use reaper::ReaperHandle;
pub(crate) use reaper::spawn_reaper;
