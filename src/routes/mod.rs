//! Rutas del gateway

pub mod asset_routes;
pub mod dashboard_routes;
pub mod rental_routes;
pub mod table_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo del gateway, con estado, CORS y trazas
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api", create_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router de `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/rentals", rental_routes::create_rental_router())
        .nest("/assets", asset_routes::create_asset_router())
        .nest("/tables", table_routes::create_table_router())
        .merge(dashboard_routes::create_dashboard_router())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-console",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
