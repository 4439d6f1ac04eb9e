//! HTTP source adapter error types.

/// Errors raised while constructing an [`HttpAssetSource`](crate::HttpAssetSource).
///
/// Request-time failures are reported as
/// [`LoadError`](assetdash_domain::error::LoadError) instead.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The endpoint is not an absolute `http`/`https` URL.
    #[error("invalid endpoint URL `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The bearer credential is empty.
    #[error("bearer token is empty")]
    EmptyToken,

    /// The reqwest client could not be built (TLS backend, …).
    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
