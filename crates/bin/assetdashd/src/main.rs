//! # assetdashd — asset dashboard daemon
//!
//! Composition root that wires the asset source, the loader, and the HTTP
//! dashboard together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and resolve the bearer token
//! - Initialize `tracing` logging
//! - Construct the configured asset source (adapter)
//! - Construct the data loader and activate it once at startup
//! - Build the axum router and serve on a TCP port
//! - Handle graceful shutdown (SIGTERM/SIGINT), tearing the loader down so a
//!   late response is never published
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! Only wiring lives here; asset semantics stay in `domain` and `app`.

mod config;
mod source;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use assetdash_adapter_http_axum::state::AppState;
use assetdash_app::loader::DataLoader;
use assetdash_domain::card::CardRenderer;
use assetdash_domain::time::offset_from_minutes;

use crate::config::Config;
use crate::source::DashboardSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Source & loader
    let source = DashboardSource::from_config(&config.source)?;
    let loader = Arc::new(DataLoader::new(source));

    // HTTP
    let renderer = CardRenderer::new(offset_from_minutes(config.dashboard.utc_offset_minutes));
    let state = AppState::new(Arc::clone(&loader), renderer)
        .with_refresh_seconds(config.dashboard.refresh_seconds);
    let app = assetdash_adapter_http_axum::router::build(state);

    // One load cycle as soon as the dashboard exists; the handle is held
    // until shutdown so dropping it cancels an unfinished cycle.
    let initial_load = loader.activate();

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, source = ?config.source.kind, "assetdashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    loader.close();
    drop(initial_load);
    tracing::info!("assetdashd stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
