//! Pokecache - An in-memory response cache for REST API clients
//!
//! Stores response bodies keyed by URL and expires them a fixed interval
//! after insertion, with a background reaper doing the sweeping.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, Codec, TimedCache};
pub use client::{Fetcher, RefreshPolicy, Session};
pub use config::Config;
pub use error::{CacheError, FetchError};
