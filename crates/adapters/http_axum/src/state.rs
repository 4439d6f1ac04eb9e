//! Shared application state for axum handlers.

use std::sync::Arc;

use assetdash_app::loader::DataLoader;
use assetdash_app::ports::AssetSource;
use assetdash_domain::card::CardRenderer;

/// Default `<meta http-equiv="refresh">` interval while loading.
pub const DEFAULT_REFRESH_SECONDS: u32 = 2;

/// Application state shared across all axum handlers.
///
/// Generic over the asset source to avoid dynamic dispatch. `Clone` is
/// implemented manually so the source itself does not need to be `Clone`.
pub struct AppState<S> {
    /// The loader whose state the dashboard renders.
    pub loader: Arc<DataLoader<S>>,
    /// Maps assets to cards.
    pub renderer: CardRenderer,
    /// Auto-refresh interval of the page while a load cycle is running.
    pub refresh_seconds: u32,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            renderer: self.renderer,
            refresh_seconds: self.refresh_seconds,
        }
    }
}

impl<S> AppState<S>
where
    S: AssetSource + 'static,
{
    /// Create state around an already shared loader.
    ///
    /// The loader is shared so the composition root can activate and tear it
    /// down independently of the HTTP layer.
    pub fn new(loader: Arc<DataLoader<S>>, renderer: CardRenderer) -> Self {
        Self {
            loader,
            renderer,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
        }
    }

    /// Override the auto-refresh interval used while loading.
    #[must_use]
    pub fn with_refresh_seconds(mut self, refresh_seconds: u32) -> Self {
        self.refresh_seconds = refresh_seconds.max(1);
        self
    }
}
