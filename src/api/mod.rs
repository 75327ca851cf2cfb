//! REST API for the configuration editor
//!
//! The browser editor loads a file, edits the DSS keys and SIP account, and
//! posts the full set back together with the text it originally loaded.

pub mod config_routes;

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::storage::ConfigStore;

pub use config_routes::{create_config_router, ConfigState};

/// Build the full router: config routes, health check, tracing and a
/// permissive CORS policy for the editor front end.
pub fn build_router(store: Arc<dyn ConfigStore>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(create_config_router(ConfigState::new(store)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// GET /api/health
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "fanvil-cfg",
    }))
}
