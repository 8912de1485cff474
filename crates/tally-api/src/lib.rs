//! tally-api
//!
//! HTTP layer for the tally expense tracker. Wires the rate limiter and the
//! JSON store into axum handlers; all business rules live in tally-core.

pub mod config;
pub mod error;
mod extract;
mod handlers;
mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use tally_core::RateLimiter;
use tally_storage_json::JsonStore;

pub use config::Config;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub limiter: Arc<RateLimiter>,
}

/// Builds the full router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::api_routes())
        .with_state(state)
}

/// Opens the store, builds the router, and serves until shutdown.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(JsonStore::open(&config.data_dir)?);
    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    let app = router(AppState { store, limiter });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, data_dir = %config.data_dir.display(), "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
