//! Background Tasks Module
//!
//! Contains background tasks that run alongside the cache.
//!
//! # Tasks
//! - Reaper: Removes expired cache entries once per cache interval

mod reaper;

pub use reaper::spawn_reaper;
