//! Cache Entry Module
//!
//! Defines the record stored for each cached response body.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload and the instant it was inserted.
///
/// Entries are never mutated after creation; overwriting a key replaces
/// the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Insertion instant, monotonic
    created_at: Instant,
    /// Stored bytes, already encoded by the cache's codec
    payload: Vec<u8>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(payload: Vec<u8>) -> Self {
        Self::with_created_at(payload, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    pub fn with_created_at(payload: Vec<u8>, created_at: Instant) -> Self {
        Self {
            created_at,
            payload,
        }
    }

    /// Returns the stored payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the creation instant.
    pub fn inserted_at(&self) -> Instant {
        self.created_at
    }

    // == Age ==
    /// Time elapsed between insertion and `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has reached the given interval.
    ///
    /// Boundary condition: an entry whose age equals the interval is expired.
    pub fn is_expired(&self, now: Instant, interval: Duration) -> bool {
        self.age(now) >= interval
    }
}
