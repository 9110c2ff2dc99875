//! Cache Module
//!
//! Provides an in-memory response cache with time-based expiry and optional
//! payload compression.

mod codec;
mod entry;
mod stats;
mod store;
mod timed;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use codec::Codec;
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use timed::{TimedCache, MIN_INTERVAL};
