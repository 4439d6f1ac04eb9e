//! Runtime selection of the asset source.

use std::time::Duration;

use assetdash_adapter_fixture::FixtureAssetSource;
use assetdash_adapter_source_http::{HttpAssetSource, SourceError};
use assetdash_app::ports::AssetSource;
use assetdash_domain::asset::Asset;
use assetdash_domain::error::LoadError;

use crate::config::{SourceConfig, SourceKind};

/// The asset source chosen by configuration.
#[derive(Debug)]
pub enum DashboardSource {
    Http(HttpAssetSource),
    Fixture(FixtureAssetSource),
}

impl DashboardSource {
    /// Build the configured source.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the HTTP source cannot be constructed or
    /// no bearer token was resolved.
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        match config.kind {
            SourceKind::Http => {
                let credential = config.token.clone().ok_or(SourceError::EmptyToken)?;
                let source = HttpAssetSource::new(&config.http, credential)?;
                tracing::info!(endpoint = %source.endpoint(), "using http asset source");
                Ok(Self::Http(source))
            }
            SourceKind::Fixture => {
                let delay = Duration::from_millis(config.fixture.delay_ms);
                tracing::info!(?delay, "using fixture asset source");
                Ok(Self::Fixture(FixtureAssetSource::sample(delay)))
            }
        }
    }
}

impl AssetSource for DashboardSource {
    async fn fetch(&self) -> Result<Vec<Asset>, LoadError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::Fixture(source) => source.fetch().await,
        }
    }
}
