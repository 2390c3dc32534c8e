//! Availability service: SKU resolver results over HTTP.
//!
//! Every request triggers its own upstream fetch; handlers share nothing
//! mutable.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::resolver::SkuResolver;
use crate::scrapers::HttpClient;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<SkuResolver>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = HttpClient::new(settings.fetch_options())?;
        let resolver = SkuResolver::new(Arc::new(client), settings.api_endpoints());
        Ok(Self::with_resolver(resolver))
    }

    pub fn with_resolver(resolver: SkuResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::resolver::ApiEndpoints;
    use crate::test_utils::CannedFetcher;

    fn setup_test_app() -> axum::Router {
        let endpoints = ApiEndpoints::default();
        let fetcher = CannedFetcher::new()
            .with_page(
                &endpoints.product_url("M1"),
                r#"{"model":[
                    {"identifier":"M1","additionalProperty":[{"name":"backOrderDisclaimer","value":false}]},
                    {"identifier":"M2","additionalProperty":[{"name":"backOrderDisclaimer","value":true}]}
                ]}"#,
            )
            .with_page(&endpoints.product_url("BAD"), r#"{"errorCode":"404"}"#)
            .with_page(
                &endpoints.catalog_url("M1"),
                r#"{"skuListSize":1,"skuList":[{"url":"https://shop.example/m1",
                    "_links":{"self":{"href":"https://api.example/m1"}}}]}"#,
            )
            .with_page(&endpoints.catalog_url("BAD"), r#"{"skuListSize":0}"#);

        let resolver = SkuResolver::new(Arc::new(fetcher), endpoints);
        create_router(AppState::with_resolver(resolver))
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = setup_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_item() {
        let (status, json) = get_json(setup_test_app(), "/api/item/M1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"Sku": "M1", "Available": true}));
    }

    #[tokio::test]
    async fn test_api_item_unknown_sku() {
        let (_, json) = get_json(setup_test_app(), "/api/item/BAD").await;
        assert_eq!(json, serde_json::json!({"Sku": "BAD", "Available": false}));
    }

    #[tokio::test]
    async fn test_api_item_family() {
        let (status, json) = get_json(setup_test_app(), "/api/itemfamily/M1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                {"Sku": "M1", "Available": true},
                {"Sku": "M2", "Available": false}
            ])
        );
    }

    #[tokio::test]
    async fn test_api_item_family_error_is_null() {
        let (_, json) = get_json(setup_test_app(), "/api/itemfamily/BAD").await;
        assert!(json.is_null());
    }

    #[tokio::test]
    async fn test_api_link() {
        let (_, json) = get_json(setup_test_app(), "/api/link/M1").await;
        assert_eq!(json["Url"], "https://shop.example/m1");
        assert_eq!(json["Endpoint"], "https://api.example/m1");

        let (_, json) = get_json(setup_test_app(), "/api/link/BAD").await;
        assert_eq!(json["Url"], "Invalid SKU");
        assert_eq!(json["Endpoint"], "Invalid SKU");
    }
}
