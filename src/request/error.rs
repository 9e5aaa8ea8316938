use thiserror::Error;

/// Errors raised while composing a request, before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The place specifier cannot be turned into a query-string fragment.
    #[error("query cannot be encoded: {0}")]
    InvalidQuery(String),

    /// A caller-supplied option is outside the domain the provider accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The UV index endpoints refuse to build a URL without a stored API key.
    #[error("an API key is required for this endpoint; set one on the client builder or via set_api_key")]
    MissingApiKey,
}
