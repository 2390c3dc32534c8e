//! Router configuration for the availability service.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/api/item/:sku", get(handlers::api_item))
        .route("/api/itemfamily/:sku", get(handlers::api_item_family))
        .route("/api/link/:sku", get(handlers::api_link))
        // The stock tracker front end calls this from another origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
