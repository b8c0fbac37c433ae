// src/api/mod.rs — HTTP API for session scoring

pub mod handlers;
pub mod types;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::AppContext;
use crate::infra::config::ServerConfig;

/// Shared state for API handlers. Read-only after start-up.
#[derive(Clone)]
pub struct ApiState {
    pub ctx: Arc<AppContext>,
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState, cors_origins: &[String]) -> Router {
    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .with_state(state);

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        return router;
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);
    router.layer(cors)
}

/// Start the API server (runs until the process is stopped).
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = config.addr();
    let router = build_router(state, &config.cors_origins);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}
