//! Fetch-through HTTP client
//!
//! Serves GET requests from the [`TimedCache`] when possible and falls back
//! to the network on a miss.

use reqwest::Client;
use tracing::{debug, warn};

use crate::cache::TimedCache;
use crate::config::Config;
use crate::error::{FetchError, FetchResult};

// == Refresh Policy ==
/// Whether serving a cached body resets that entry's age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Only network fetches insert; entries expire one interval after the fetch
    #[default]
    OnMiss,
    /// Every fetch re-inserts the body, so frequently used URLs stay cached
    OnEveryFetch,
}

impl RefreshPolicy {
    pub fn from_flag(refresh_on_hit: bool) -> Self {
        if refresh_on_hit {
            RefreshPolicy::OnEveryFetch
        } else {
            RefreshPolicy::OnMiss
        }
    }
}

// == Fetcher ==
/// HTTP client that consults a [`TimedCache`] keyed by URL.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    cache: TimedCache,
    policy: RefreshPolicy,
}

impl Fetcher {
    /// Creates a fetcher with a default HTTP client.
    pub fn new(cache: TimedCache) -> Self {
        Self::with_client(Client::new(), cache)
    }

    pub fn with_client(client: Client, cache: TimedCache) -> Self {
        Self {
            client,
            cache,
            policy: RefreshPolicy::default(),
        }
    }

    /// Builds the cache and HTTP client described by `config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_config(config: &Config) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let cache = TimedCache::from_config(config);

        Ok(Self::with_client(client, cache)
            .with_policy(RefreshPolicy::from_flag(config.refresh_on_hit)))
    }

    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    // == Fetch ==
    /// Returns the body for `url`, from the cache if present.
    ///
    /// On a miss the URL is requested; a successful body is cached before it
    /// is returned. Non-success responses are errors and are never cached.
    pub async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        if let Some(body) = self.cache.get(url).await {
            debug!("Cache hit for {}", url);
            if self.policy == RefreshPolicy::OnEveryFetch {
                self.store(url, &body).await;
            }
            return Ok(body);
        }

        debug!("Cache miss for {}, requesting", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?.to_vec();
        self.store(url, &body).await;
        Ok(body)
    }

    // A failed insert only costs a future refetch.
    async fn store(&self, url: &str, body: &[u8]) {
        if let Err(e) = self.cache.add(url, body).await {
            warn!("Not caching response for {}: {}", url, e);
        }
    }

    /// Closes the underlying cache, stopping its reaper.
    pub async fn close(self) -> crate::error::Result<()> {
        self.cache.close().await
    }
}
