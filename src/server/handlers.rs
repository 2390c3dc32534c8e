//! HTTP request handlers for the availability service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use super::AppState;

/// Landing text.
pub async fn home() -> impl IntoResponse {
    info!("Endpoint hit: home");
    "skuwatch availability service"
}

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Availability of a single SKU.
pub async fn api_item(State(state): State<AppState>, Path(sku): Path<String>) -> impl IntoResponse {
    info!("Endpoint hit: item for SKU {}", sku);
    Json(state.resolver.resolve_availability(&sku).await)
}

/// Availability of every style bundled with a SKU; `null` when upstream
/// rejected the SKU.
pub async fn api_item_family(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> impl IntoResponse {
    info!("Endpoint hit: item family for SKU {}", sku);
    Json(state.resolver.resolve_family_availability(&sku).await)
}

/// Product page URL and API self-link of a SKU.
pub async fn api_link(State(state): State<AppState>, Path(sku): Path<String>) -> impl IntoResponse {
    info!("Endpoint hit: link for SKU {}", sku);
    let link = state.resolver.resolve_product_link(&sku).await;
    Json(serde_json::json!({
        "Sku": sku,
        "Url": link.url.as_str(),
        "Endpoint": link.endpoint.as_str(),
    }))
}
