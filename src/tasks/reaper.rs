//! Expiry Reaper Task
//!
//! Background task that periodically removes cache entries older than the
//! cache interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// Each pass sleeps for the interval, then takes the store lock once and
/// removes every entry whose age has reached the interval. The same
/// interval is both the sweep period and the expiry threshold, so an entry
/// lives between one and two intervals.
///
/// The task exits as soon as `shutdown` changes or its sender is dropped,
/// without waiting for the current sleep to finish.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let (tx, rx) = watch::channel(false);
/// let handle = spawn_reaper(store.clone(), Duration::from_secs(5), rx);
/// // Later:
/// tx.send(true).ok();
/// handle.await?;
/// ```
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Starting cache reaper with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => break,
            }

            let (removed, remaining) = {
                let mut store = store.lock().await;
                let removed = store.remove_expired(Instant::now(), interval);
                (removed, store.len())
            };

            if removed > 0 {
                info!(
                    "Cache sweep: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }

        debug!("Cache reaper stopped");
    })
}
