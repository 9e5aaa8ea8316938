//! The fetch capability: how raw response bodies are retrieved.
//!
//! The client only ever asks for "the body behind this URL"; everything
//! else about HTTP (timeouts, TLS, proxies) belongs to the capability
//! implementation. Substituting an in-memory fake in tests is the point of
//! the seam.

use crate::transport::error::TransportError;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;

/// A capability that retrieves the raw body behind a URL.
///
/// Implementations must be cheap to share across calls; the client holds
/// one behind an `Arc` for the whole of its lifetime.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieves the body, or fails with a terminal [`TransportError`].
    async fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

/// The default fetch capability, backed by a shared [`reqwest::Client`].
#[derive(Debug, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        info!("fetching {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                url: url.to_string(),
                source: e,
            })?;

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!("HTTP error for {url}: {e:?}");
                return Err(if let Some(status) = e.status() {
                    TransportError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    TransportError::Network {
                        url: url.to_string(),
                        source: e,
                    }
                });
            }
        };

        response.text().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            source: e,
        })
    }
}
