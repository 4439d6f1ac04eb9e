//! # assetdash-adapter-fixture
//!
//! Fixture asset source that serves a fixed collection after a simulated
//! network delay. Useful for demos and for exercising the dashboard without
//! a live backend.
//!
//! ## Provided assets
//!
//! | Id | Name | Status | Flags |
//! |----|------|--------|-------|
//! | `fx-press-01` | Hydraulic Press | `UP` | critical, safety |
//! | `fx-lathe-02` | CNC Lathe | `DOWN` | critical |
//! | `fx-crane-03` | Overhead Crane | `MAINTENANCE` | safety |
//! | `fx-pump-04` | Coolant Pump | unknown | none |
//!
//! ## Dependency rule
//!
//! Depends on `assetdash-app` (port traits) and `assetdash-domain` only.

use std::time::Duration;

use assetdash_app::ports::AssetSource;
use assetdash_domain::asset::{Asset, AssetStatus};
use assetdash_domain::error::LoadError;

/// Asset source backed by an in-memory collection.
#[derive(Debug, Clone)]
pub struct FixtureAssetSource {
    assets: Vec<Asset>,
    delay: Duration,
}

impl FixtureAssetSource {
    /// Serve `assets` after waiting `delay`.
    #[must_use]
    pub fn new(assets: Vec<Asset>, delay: Duration) -> Self {
        Self { assets, delay }
    }

    /// Serve the built-in sample collection after waiting `delay`.
    #[must_use]
    pub fn sample(delay: Duration) -> Self {
        Self::new(sample_assets(), delay)
    }

    /// The collection this source returns.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }
}

impl AssetSource for FixtureAssetSource {
    async fn fetch(&self) -> Result<Vec<Asset>, LoadError> {
        tracing::debug!(delay = ?self.delay, "serving fixture assets");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.assets.clone())
    }
}

/// The built-in sample collection.
#[must_use]
pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset::new("fx-press-01")
            .with_name("Hydraulic Press")
            .with_status(AssetStatus::Up)
            .with_critical(true)
            .with_safety(true)
            .with_updated_at("2025-09-07T13:53:05.371Z")
            .with_group("5f1a9c0e2b7d4a0017c3e901")
            .with_company("5d7b2b8c66fb7300172be5df"),
        Asset::new("fx-lathe-02")
            .with_name("CNC Lathe")
            .with_status(AssetStatus::Down)
            .with_critical(true)
            .with_updated_at("2025-09-06T08:12:44.000Z")
            .with_group("5f1a9c0e2b7d4a0017c3e901")
            .with_company("5d7b2b8c66fb7300172be5df"),
        Asset::new("fx-crane-03")
            .with_name("Overhead Crane")
            .with_status(AssetStatus::Maintenance)
            .with_safety(true)
            .with_updated_at("2025-09-05T17:30:00.000Z")
            .with_group("5f1a9c0e2b7d4a0017c3e902")
            .with_company("5d7b2b8c66fb7300172be5df"),
        Asset::new("fx-pump-04")
            .with_name("Coolant Pump")
            .with_updated_at("2025-09-07T06:00:00.000Z")
            .with_group("5f1a9c0e2b7d4a0017c3e902")
            .with_company("5d7b2b8c66fb7300172be5df"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn should_return_sample_assets_without_delay() {
        let source = FixtureAssetSource::sample(Duration::ZERO);
        let assets = source.fetch().await.unwrap();
        assert_eq!(assets.len(), 4);
        assert_eq!(assets[0].name.as_deref(), Some("Hydraulic Press"));
    }

    #[test]
    fn should_use_unique_ids_in_sample() {
        let assets = sample_assets();
        let ids: HashSet<_> = assets.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids.len(), assets.len());
    }

    #[test]
    fn should_cover_every_status_in_sample() {
        let statuses: HashSet<_> = sample_assets().iter().map(|a| a.status).collect();
        assert!(statuses.contains(&AssetStatus::Up));
        assert!(statuses.contains(&AssetStatus::Down));
        assert!(statuses.contains(&AssetStatus::Maintenance));
        assert!(statuses.contains(&AssetStatus::Unknown));
    }

    #[tokio::test(start_paused = true)]
    async fn should_wait_for_configured_delay() {
        let source = FixtureAssetSource::sample(Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        source.fetch().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn should_serve_custom_collection() {
        let source = FixtureAssetSource::new(vec![Asset::new("only")], Duration::ZERO);
        let assets = source.fetch().await.unwrap();
        assert_eq!(assets, source.assets());
    }
}
