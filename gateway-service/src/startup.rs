//! Application startup and router assembly.

use crate::config::GatewayConfig;
use crate::handlers;
use crate::services::providers::ProviderRegistry;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub providers: Arc<ProviderRegistry>,
}

/// Health check endpoint for Docker/K8s liveness probes.
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "gateway-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Assemble the gateway router.
///
/// Both proxy routes accept POST and OPTIONS only; any other method
/// lands on the per-route fallback and gets the 405 envelope.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/chat",
            post(handlers::chat::chat)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/generate-image",
            post(handlers::image::generate_image)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
}
