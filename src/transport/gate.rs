use crate::transport::cache::ResponseCache;
use crate::transport::error::TransportError;
use crate::transport::fetch::Fetch;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

/// Decides whether a request is served from cache or fetched.
///
/// Owns the injected fetch and cache capabilities for the client's lifetime.
/// The gate performs no locking: two concurrent resolves of the same URL may
/// both miss and both fetch. Duplicate fetches are idempotent, merely
/// wasteful.
pub(crate) struct CachedFetcher {
    fetcher: Arc<dyn Fetch>,
    cache: Option<Arc<dyn ResponseCache>>,
    ttl: Duration,
}

impl CachedFetcher {
    pub(crate) fn new(
        fetcher: Arc<dyn Fetch>,
        cache: Option<Arc<dyn ResponseCache>>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            fetcher,
            cache,
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Returns the body for `url` and whether it was served from cache.
    ///
    /// A TTL of zero disables caching entirely, even when a cache capability
    /// is configured.
    pub(crate) async fn resolve(&self, url: &str) -> Result<(String, bool), TransportError> {
        let cache = match &self.cache {
            Some(cache) if !self.ttl.is_zero() => cache,
            _ => {
                let body = self.fetcher.fetch(url).await?;
                return Ok((body, false));
            }
        };

        if cache.is_fresh(url, self.ttl) {
            if let Some(body) = cache.get(url) {
                info!("cache hit for {url}");
                return Ok((body, true));
            }
        }

        warn!("cache miss for {url}, fetching");
        let body = self.fetcher.fetch(url).await?;
        cache.put(url, &body);
        Ok((body, false))
    }
}
