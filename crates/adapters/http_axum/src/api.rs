//! JSON view of the dashboard state.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Serialize;

use assetdash_app::loader::LoadState;
use assetdash_app::ports::AssetSource;
use assetdash_domain::card::{AssetCard, CardRenderer};
use assetdash_domain::error::LoadErrorKind;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: AssetSource + 'static,
{
    Router::new().route("/state", get(show::<S>))
}

/// Body of `GET /api/state`, tagged by `state`.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StateResponse {
    Loading,
    Error {
        kind: LoadErrorKind,
        message: String,
    },
    Loaded {
        count: usize,
        cards: Vec<AssetCard>,
    },
}

impl StateResponse {
    /// Project a loader state, rendering cards for a loaded collection.
    #[must_use]
    pub fn from_state(load_state: &LoadState, renderer: &CardRenderer) -> Self {
        match load_state {
            LoadState::Loading => Self::Loading,
            LoadState::Error(failure) => Self::Error {
                kind: failure.kind,
                message: failure.message.clone(),
            },
            LoadState::Loaded(assets) => Self::Loaded {
                count: assets.len(),
                cards: renderer.render_all(assets),
            },
        }
    }
}

/// `GET /api/state`
pub async fn show<S>(State(state): State<AppState<S>>) -> Json<StateResponse>
where
    S: AssetSource + 'static,
{
    let load_state = state.loader.state();
    Json(StateResponse::from_state(&load_state, &state.renderer))
}
