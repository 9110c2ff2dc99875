//! Browsing session
//!
//! Holds the pagination cursor for one user of the API, so that "next" and
//! "previous" navigation state travels with the session instead of living in
//! process-wide globals.

use serde::Deserialize;
use tracing::debug;

use crate::client::Fetcher;
use crate::config::{normalize_base_url, Config};
use crate::error::{FetchError, FetchResult};

/// Listing endpoint the cursor starts from
pub const LOCATION_AREA_PATH: &str = "location-area";

// == Cursor ==
/// Pagination position within a listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    /// URL of the page after the current one
    pub next: Option<String>,
    /// URL of the page before the current one
    pub previous: Option<String>,
}

/// The only part of a listing response the session reads.
#[derive(Debug, Deserialize)]
struct PageEnvelope {
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
}

// == Session ==
#[derive(Debug)]
pub struct Session {
    fetcher: Fetcher,
    base_url: String,
    cursor: Cursor,
}

impl Session {
    /// Creates a session positioned before the first location-area page.
    pub fn new(fetcher: Fetcher, base_url: &str) -> Self {
        let base_url = normalize_base_url(base_url);
        let cursor = Cursor {
            next: Some(format!("{}{}", base_url, LOCATION_AREA_PATH)),
            previous: None,
        };

        Self {
            fetcher,
            base_url,
            cursor,
        }
    }

    /// Builds the fetcher and cache described by `config`.
    pub fn from_config(config: &Config) -> FetchResult<Self> {
        Ok(Self::new(Fetcher::from_config(config)?, &config.base_url))
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Navigation ==
    /// Loads the next listing page and advances the cursor.
    pub async fn next_page(&mut self) -> FetchResult<Vec<u8>> {
        let url = self.cursor.next.clone().ok_or(FetchError::NoNextPage)?;
        self.load_page(&url).await
    }

    /// Loads the previous listing page and moves the cursor back.
    pub async fn previous_page(&mut self) -> FetchResult<Vec<u8>> {
        let url = self
            .cursor
            .previous
            .clone()
            .ok_or(FetchError::NoPreviousPage)?;
        self.load_page(&url).await
    }

    // The cursor only moves once the page has been fetched and parsed.
    async fn load_page(&mut self, url: &str) -> FetchResult<Vec<u8>> {
        let body = self.fetcher.fetch(url).await?;
        let page: PageEnvelope = serde_json::from_slice(&body)?;

        debug!(
            "Page {} loaded, next={:?} previous={:?}",
            url, page.next, page.previous
        );
        self.cursor = Cursor {
            next: page.next,
            previous: page.previous,
        };
        Ok(body)
    }

    // == Resource ==
    /// Fetches `{base_url}{path}`, e.g. `pokemon/pikachu`, without moving the cursor.
    pub async fn resource(&self, path: &str) -> FetchResult<Vec<u8>> {
        let trimmed = path.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        self.fetcher
            .fetch(&format!("{}{}", self.base_url, trimmed))
            .await
    }

    /// Closes the session's cache.
    pub async fn close(self) -> crate::error::Result<()> {
        self.fetcher.close().await
    }
}
