//! Pokecache - An in-memory response cache for REST API clients
//!
//! Walks the first location-area pages of the configured API and shows the
//! cache absorbing a repeated request.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecache::{Config, Session};

/// Entry point.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the session, its cache and reaper
/// 4. Fetch page 1, page 2, step back, then forward to page 2 again
///    (the last request is served from cache)
/// 5. Log cache statistics and close the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: interval={}s, compression={}, base_url={}, refresh_on_hit={}",
        config.interval_secs, config.compression, config.base_url, config.refresh_on_hit
    );

    let mut session = Session::from_config(&config).context("Failed to build HTTP client")?;

    let first = session.next_page().await.context("Failed to load first page")?;
    info!("First page: {} bytes", first.len());

    let second = session.next_page().await.context("Failed to load second page")?;
    info!("Second page: {} bytes", second.len());

    let again = session
        .previous_page()
        .await
        .context("Failed to load previous page")?;
    info!("Back to first page: {} bytes", again.len());

    let forward = session.next_page().await.context("Failed to reload second page")?;
    info!(
        "Second page again: {} bytes, identical={}",
        forward.len(),
        forward == second
    );

    let stats = session.fetcher().cache().stats().await;
    info!("Cache stats: {}", serde_json::to_string(&stats)?);

    session.close().await?;
    info!("Shutdown complete");
    Ok(())
}
