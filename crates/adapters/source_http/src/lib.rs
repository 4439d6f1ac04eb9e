//! # assetdash-adapter-source-http
//!
//! [`AssetSource`] implementation that fetches the asset envelope from a
//! remote HTTP endpoint using [reqwest](https://docs.rs/reqwest).
//!
//! ## Request
//! `GET <endpoint>` with `Authorization: Bearer <token>` and
//! `Accept: application/json`. One call to [`AssetSource::fetch`] is exactly
//! one request: no retries, no redirects to other hosts beyond reqwest's
//! default policy.
//!
//! ## Failure mapping
//! | Condition | [`LoadError`] variant |
//! |-----------|-----------------------|
//! | connect / TLS / timeout / body read | `Network` |
//! | non-2xx status | `HttpStatus` |
//! | body not JSON | `MalformedBody` |
//! | JSON without a `tools` array | `Schema` |
//!
//! ## Dependency rule
//! Depends on `assetdash-app` (port trait) and `assetdash-domain` only.

pub mod config;
pub mod error;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Url};

use assetdash_app::ports::AssetSource;
use assetdash_domain::asset::{Asset, decode_collection};
use assetdash_domain::error::LoadError;

pub use config::{Credential, HttpSourceConfig};
pub use error::SourceError;

/// Asset source backed by a remote HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    http: Client,
    endpoint: Url,
    credential: Credential,
}

impl HttpAssetSource {
    /// Build a source from its configuration and injected credential.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidEndpoint`] when the endpoint is not an
    /// absolute `http`/`https` URL, or [`SourceError::ClientBuild`] when the
    /// HTTP client cannot be created.
    pub fn new(config: &HttpSourceConfig, credential: Credential) -> Result<Self, SourceError> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(SourceError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint,
            credential,
        })
    }

    /// The URL every fetch targets.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl AssetSource for HttpAssetSource {
    async fn fetch(&self) -> Result<Vec<Asset>, LoadError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting assets");

        let response = self
            .http
            .get(self.endpoint.clone())
            .bearer_auth(self.credential.expose())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(LoadError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(LoadError::network)?;
        tracing::debug!(bytes = body.len(), "asset response received");
        decode_collection(&body)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, SourceError> {
    let invalid = |reason: String| SourceError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}
