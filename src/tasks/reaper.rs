//! Reaper Task
//!
//! Background task that periodically evicts entries older than the cache
//! interval.

use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::store::lock_store;
use crate::cache::CacheStore;

/// Shortest period between passes. A zero interval still ticks at this rate.
const MIN_TICK: Duration = Duration::from_millis(1);

// == Reaper Handle ==
/// Controls the background reaper of a [`Cache`](crate::cache::Cache).
///
/// Dropping the handle detaches the task; it then stops on its own once the
/// cache itself is dropped.
#[derive(Debug)]
pub struct ReaperHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    // == Shutdown ==
    /// Signals the reaper to stop and waits until it has exited.
    ///
    /// A pass already in progress completes before the task returns.
    pub async fn shutdown(self) {
        // The receiver is gone only if the task already exited
        let _ = self.stop.send(true);

        if let Err(err) = self.task.await {
            if !err.is_cancelled() {
                warn!("Reaper task failed: {}", err);
            }
        }
    }

    // == Abort ==
    /// Aborts the reaper without waiting for it.
    pub fn abort(&self) {
        self.task.abort();
    }

    // == Is Finished ==
    /// Returns true once the reaper task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

// == Spawn ==
/// Spawns the reaper for `store`, running one eviction pass per `interval`.
///
/// The first pass happens one full interval after spawning, or after
/// [`MIN_TICK`] when `interval` is shorter. The task holds only a weak
/// reference so it never keeps a dropped cache alive.
///
/// # Panics
/// Panics if called outside a tokio runtime.
pub(crate) fn spawn_reaper(store: Weak<Mutex<CacheStore>>, interval: Duration) -> ReaperHandle {
    let (stop, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("Starting cache reaper with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval.max(MIN_TICK));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Resolves on an explicit stop; pends forever if the handle was dropped
        let stopped = async move {
            let requested = stop_rx.wait_for(|stop| *stop).await.is_ok();
            if !requested {
                std::future::pending::<()>().await;
            }
        };
        tokio::pin!(stopped);

        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut stopped => {
                    info!("Cache reaper stopped");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let Some(shared) = store.upgrade() else {
                debug!("Cache dropped, reaper exiting");
                break;
            };

            let removed = lock_store(&shared).reap_expired();
            drop(shared);

            if removed > 0 {
                debug!("Reaper pass: removed {} expired entries", removed);
            }
        }
    });

    ReaperHandle { stop, task }
}
