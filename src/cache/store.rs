//! Cache Store Module
//!
//! The map and counters that live behind the cache's mutex. Every method
//! here assumes the caller already holds the lock.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-value storage with TTL-since-insert expiry.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores an already-encoded payload, stamped with the current instant.
    ///
    /// If the key already exists the whole entry is replaced.
    pub fn insert(&mut self, key: String, payload: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(payload));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Payload ==
    /// Returns the stored payload for `key`, whatever its age.
    pub fn payload(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(CacheEntry::payload)
    }

    /// Returns the full entry for `key`.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Remove Expired ==
    /// Removes every entry whose age at `now` has reached `interval`.
    ///
    /// Returns the number of entries removed and records the sweep.
    pub fn remove_expired(&mut self, now: Instant, interval: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, interval));
        let removed = before - self.entries.len();

        self.stats.record_sweep(removed);
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

    pub fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
