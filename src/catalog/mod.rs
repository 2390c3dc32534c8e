//! Catalog discovery: regions, navigation categories and product listings.
//!
//! The stages in [`stages`] are pure functions over a parsed page.
//! [`CatalogDiscovery`] pairs each of them with a fetch so callers can walk the
//! storefront one level at a time, passing the parent's URL down.

pub mod records;
pub mod selectors;
pub mod stages;

use std::sync::Arc;

use scraper::Html;
use tracing::{info, warn};
use url::Url;

pub use records::{
    AvailabilityRecord, CategoryRecord, ProductImageRecord, ProductRouteRecord, RegionRecord,
};

use crate::scrapers::Fetch;

/// Dispatch page listing every regional storefront.
pub const DEFAULT_DISPATCH_URL: &str = "https://www.louisvuitton.com/dispatch/?noDRP=true";

/// Resolve a route found on `base` to an absolute URL.
///
/// Absolute routes are returned unchanged. If `base` cannot be parsed the
/// route is returned as-is.
pub fn resolve_route(base: &str, route: &str) -> String {
    if route.starts_with("http://") || route.starts_with("https://") {
        return route.to_string();
    }
    Url::parse(base)
        .and_then(|b| b.join(route))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| route.to_string())
}

/// Fetch-then-extract entry points for every stage.
#[derive(Clone)]
pub struct CatalogDiscovery {
    fetcher: Arc<dyn Fetch>,
    dispatch_url: String,
}

impl CatalogDiscovery {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self::with_dispatch_url(fetcher, DEFAULT_DISPATCH_URL)
    }

    pub fn with_dispatch_url(fetcher: Arc<dyn Fetch>, dispatch_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            dispatch_url: dispatch_url.into(),
        }
    }

    pub fn dispatch_url(&self) -> &str {
        &self.dispatch_url
    }

    /// Fetch `url` and run `stage` over it. A failed fetch yields an empty
    /// result; the page status is not inspected.
    async fn run_stage<T>(&self, url: &str, stage: impl FnOnce(&Html) -> Vec<T>) -> Vec<T> {
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Request URL: {} failed: {}", url, e);
                return Vec::new();
            }
        };
        let records = parse_and_extract(&page.text(), stage);
        info!("Extracted {} records from {}", records.len(), url);
        records
    }

    /// All regional storefronts from the dispatch page.
    pub async fn regions(&self) -> Vec<RegionRecord> {
        let url = self.dispatch_url.clone();
        self.run_stage(&url, stages::extract_regions).await
    }

    /// Main navigation categories of a region landing page.
    pub async fn categories(&self, url: &str) -> Vec<CategoryRecord> {
        self.run_stage(url, stages::extract_categories).await
    }

    /// Subcategories listed under `category` on the page at `url`.
    pub async fn subcategories(&self, category: &str, url: &str) -> Vec<CategoryRecord> {
        self.run_stage(url, |doc| stages::extract_subcategories(doc, category))
            .await
    }

    /// Product names and routes on a subcategory page.
    pub async fn product_routes(&self, url: &str) -> Vec<ProductRouteRecord> {
        self.run_stage(url, stages::extract_product_routes).await
    }

    /// Product names and image URLs on a subcategory page.
    pub async fn product_images(&self, url: &str) -> Vec<ProductImageRecord> {
        self.run_stage(url, stages::extract_product_images).await
    }
}

/// Parse and extract without holding the (non-`Send`) document across an await.
fn parse_and_extract<T>(text: &str, stage: impl FnOnce(&Html) -> Vec<T>) -> Vec<T> {
    let doc = Html::parse_document(text);
    stage(&doc)
}
