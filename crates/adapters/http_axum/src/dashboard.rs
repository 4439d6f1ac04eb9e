//! Server-side rendered asset dashboard (no JavaScript).

use askama::Template;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};

use assetdash_app::loader::LoadState;
use assetdash_app::ports::AssetSource;
use assetdash_domain::card::AssetCard;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: AssetSource + 'static,
{
    Router::new()
        .route("/", get(index::<S>))
        .route("/refresh", post(refresh::<S>))
}

/// Dashboard page template.
///
/// Exactly one of the three regions renders: `loading`, then `error`, then
/// the card grid.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    loading: bool,
    error: Option<String>,
    cards: Vec<AssetCard>,
}

impl DashboardTemplate {
    /// Build the page for a loader state.
    pub fn from_state<S>(state: &AppState<S>, load_state: &LoadState) -> Self {
        let mut page = Self {
            refresh_seconds: state.refresh_seconds,
            loading: false,
            error: None,
            cards: Vec::new(),
        };
        match load_state {
            LoadState::Loading => page.loading = true,
            LoadState::Error(failure) => page.error = Some(failure.message.clone()),
            LoadState::Loaded(assets) => page.cards = state.renderer.render_all(assets),
        }
        page
    }
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render dashboard");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// `GET /`: the dashboard.
pub async fn index<S>(State(state): State<AppState<S>>) -> DashboardTemplate
where
    S: AssetSource + 'static,
{
    let load_state = state.loader.state();
    DashboardTemplate::from_state(&state, &load_state)
}

/// `POST /refresh`: start a new load cycle, then redirect back (PRG).
///
/// Ignored while a cycle is already in flight.
pub async fn refresh<S>(State(state): State<AppState<S>>) -> Redirect
where
    S: AssetSource + 'static,
{
    match state.loader.activate() {
        Some(task) => {
            tracing::info!("manual refresh started");
            task.detach();
        }
        None => tracing::debug!("manual refresh ignored: load cycle already running"),
    }
    Redirect::to("/")
}
