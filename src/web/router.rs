//! Axum router and server loop.

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::web::config::ServeConfig;
use crate::web::handlers::{
    api_columns, api_count, api_crosstab, api_summary, dashboard, health,
};
use crate::web::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Page
        .route("/", get(dashboard))
        .route("/health", get(health))
        // Read-only API
        .route("/api/columns", get(api_columns))
        .route("/api/summary", get(api_summary))
        .route("/api/count/{column}", get(api_count))
        .route("/api/crosstab/{column_a}/{column_b}", get(api_crosstab))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Load the dataset, then serve until the process is terminated.
pub async fn serve(config: ServeConfig) -> anyhow::Result<()> {
    let state = AppState::load(&config.dataset_path);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(addr = %config.addr, "dashboard listening on http://{}", config.addr);
    axum::serve(listener, router)
        .await
        .context("server error")?;
    Ok(())
}
