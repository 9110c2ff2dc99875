//! Configuration Module
//!
//! Handles loading cache and client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default sweep interval and expiry threshold in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Default REST API root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Cache and client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reaper sweep period and entry expiry threshold, in seconds
    pub interval_secs: u64,
    /// Whether payloads are gzip-compressed in memory
    pub compression: bool,
    /// Root URL of the REST API, always ending in `/`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Whether a cache hit re-inserts the body, resetting its age
    pub refresh_on_hit: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_SECS` - Sweep interval and expiry in seconds (default: 5)
    /// - `CACHE_COMPRESSION` - Compress payloads, `true`/`false` (default: true)
    /// - `API_BASE_URL` - REST API root (default: https://pokeapi.co/api/v2/)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds (default: 10)
    /// - `REFRESH_ON_HIT` - Reset entry age on cache hits (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            interval_secs: env::var("CACHE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.interval_secs),
            compression: env::var("CACHE_COMPRESSION")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.compression),
            base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.base_url),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            refresh_on_hit: env::var("REFRESH_ON_HIT")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.refresh_on_hit),
        }
    }

    /// Returns the cache interval as a Duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            compression: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            refresh_on_hit: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Ensures the base URL ends with a single trailing slash so paths can be appended.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}
