//! HTTP server wiring.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use weather_core::{Config, WeatherProvider, provider::provider_from_config};

use crate::handlers;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/results", get(handlers::results))
        .route("/comparison_results", get(handlers::comparison_results))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `bind_addr` (or the configured address) and serve until Ctrl+C.
pub async fn serve(config: &Config, bind_addr: Option<&str>) -> Result<()> {
    let provider: Arc<dyn WeatherProvider> = provider_from_config(config)?.into();
    let addr = bind_addr.unwrap_or(config.bind_addr.as_str());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;

    tracing::info!(addr = %addr, provider = %config.base_url, "weather web app listening");

    axum::serve(listener, router(AppState::new(provider)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
