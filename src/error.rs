//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use reqwest::StatusCode;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors reported by the cache itself.
///
/// None of these are fatal to callers: a failed insert only means the next
/// lookup will miss.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Payload could not be compressed on insert
    #[error("Compression failed for key {key}: {source}")]
    Compression {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored payload could not be decompressed on read
    #[error("Decompression failed for key {key}: {source}")]
    Decompression {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The background reaper task panicked or was aborted
    #[error("Reaper task failed: {0}")]
    Reaper(#[from] tokio::task::JoinError),
}

// == Fetch Error Enum ==
/// Errors returned by the fetch-through client and session.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },

    /// Response body was not a valid pagination envelope
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Cursor has no next page
    #[error("Already at the last page")]
    NoNextPage,

    /// Cursor has no previous page
    #[error("Already at the first page")]
    NoPreviousPage,

    /// Resource path was empty
    #[error("Invalid resource path: {0:?}")]
    InvalidPath(String),
}

// == Result Type Aliases ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
