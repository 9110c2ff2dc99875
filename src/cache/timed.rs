//! Timed Cache Module
//!
//! Shared handle over the cache store plus the reaper task that expires it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore, Codec};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

/// Smallest accepted interval; a zero interval would spin the reaper.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == Timed Cache ==
/// In-memory response cache whose entries expire `interval` after insertion.
///
/// Expiry is eventual: [`TimedCache::get`] never checks age, so an entry can
/// be served for up to one extra interval until the next sweep removes it.
///
/// Share across tasks with `Arc<TimedCache>`. Dropping the cache stops its
/// reaper; [`TimedCache::close`] also waits for the reaper to finish.
#[derive(Debug)]
pub struct TimedCache {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    codec: Codec,
    shutdown: watch::Sender<bool>,
    reaper: JoinHandle<()>,
}

impl TimedCache {
    // == Constructor ==
    /// Creates an empty cache storing payloads as-is and starts its reaper.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(interval: Duration) -> Self {
        Self::with_codec(interval, Codec::Identity)
    }

    /// Creates an empty cache with the given payload codec and starts its reaper.
    pub fn with_codec(interval: Duration, codec: Codec) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(store.clone(), interval, shutdown_rx);

        Self {
            store,
            interval,
            codec,
            shutdown,
            reaper,
        }
    }

    /// Creates a cache from the interval and compression settings of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_codec(config.interval(), Codec::from_flag(config.compression))
    }

    // == Add ==
    /// Inserts or overwrites `key` with `value`.
    ///
    /// The payload is encoded before the lock is taken. If encoding fails the
    /// insert is dropped and the error returned; the cache is left unchanged.
    pub async fn add(&self, key: impl Into<String>, value: &[u8]) -> Result<()> {
        let key = key.into();

        let payload = match self.codec.encode(value) {
            Ok(payload) => payload,
            Err(source) => {
                warn!("Dropping cache insert for {}: compression failed: {}", key, source);
                self.store.lock().await.stats_mut().record_codec_failure();
                return Err(CacheError::Compression { key, source });
            }
        };

        let mut store = self.store.lock().await;
        store.insert(key, payload);
        Ok(())
    }

    // == Get ==
    /// Returns the payload stored under `key`, regardless of its age.
    ///
    /// A payload that cannot be decoded is reported as a miss.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut store = self.store.lock().await;
        let decoded = store.payload(key).map(|stored| self.codec.decode(stored));

        match decoded {
            Some(Ok(value)) => {
                store.stats_mut().record_hit();
                Some(value)
            }
            Some(Err(source)) => {
                let stats = store.stats_mut();
                stats.record_codec_failure();
                stats.record_miss();
                warn!(
                    "{}",
                    CacheError::Decompression {
                        key: key.to_string(),
                        source,
                    }
                );
                None
            }
            None => {
                store.stats_mut().record_miss();
                None
            }
        }
    }

    // == Accessors ==
    /// Sweep period and expiry threshold.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    // == Close ==
    /// Stops the reaper and waits for it to exit.
    pub async fn close(self) -> Result<()> {
        let Self {
            shutdown, reaper, ..
        } = self;

        // The reaper may already be gone, in which case there is no receiver.
        let _ = shutdown.send(true);
        reaper.await?;
        debug!("Cache closed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &Arc<Mutex<CacheStore>> {
        &self.store
    }
}
