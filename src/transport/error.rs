use thiserror::Error;

/// Errors raised by a fetch capability.
///
/// The client treats every variant as terminal and propagates it unchanged;
/// there is no retry anywhere in this crate.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("network request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    /// A free-form failure, for fetch capabilities not backed by reqwest.
    #[error("{0}")]
    Other(String),
}
