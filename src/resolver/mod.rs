//! SKU resolution against the catalog REST API.
//!
//! Two endpoints are used:
//! - `{base}/api/{locale}/catalog/skus/{sku}`: catalog lookup (page URL and
//!   API self-link)
//! - `{base}/api/{locale}/catalog/product/{sku}`: product lookup
//!   (availability of the SKU and of the other styles bundled with it)
//!
//! Responses are walked with [`crate::json_nav`]; no field is assumed to
//! exist. Nothing is cached, so every call reflects upstream state at the
//! time of the request.

mod availability;
mod lookup;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::catalog::AvailabilityRecord;
use crate::scrapers::{fetch_text_or_empty, Fetch};

pub use availability::{back_order_state, BackOrderState};

/// Default API host.
pub const DEFAULT_API_BASE: &str = "https://api.louisvuitton.com";
/// Default storefront locale used in API paths.
pub const DEFAULT_API_LOCALE: &str = "eng-ca";

/// Marker present in catalog lookups that matched nothing.
const EMPTY_SKU_LIST_MARKER: &str = "\"skuListSize\":0";
/// Marker present in product lookups that upstream rejected.
const ERROR_CODE_MARKER: &str = "errorCode";

/// Outcome of a catalog lookup for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuLookup {
    Found(String),
    /// Upstream reported an empty SKU list.
    InvalidSku,
    /// The list was present but no item carried the field, or the body could
    /// not be decoded.
    NotFound,
}

impl SkuLookup {
    pub fn as_str(&self) -> &str {
        match self {
            SkuLookup::Found(s) => s,
            SkuLookup::InvalidSku => "Invalid SKU",
            SkuLookup::NotFound => "",
        }
    }

    pub fn found(&self) -> Option<&str> {
        match self {
            SkuLookup::Found(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SkuLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page URL and API self-link for one SKU, from a single catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink {
    pub url: SkuLookup,
    pub endpoint: SkuLookup,
}

/// Where the catalog API lives.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    pub base_url: String,
    pub locale: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            locale: DEFAULT_API_LOCALE.to_string(),
        }
    }
}

impl ApiEndpoints {
    fn url(&self, resource: &str, sku: &str) -> String {
        format!(
            "{}/api/{}/catalog/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.locale,
            resource,
            urlencoding::encode(sku)
        )
    }

    /// Catalog lookup URL for `sku`.
    pub fn catalog_url(&self, sku: &str) -> String {
        self.url("skus", sku)
    }

    /// Product lookup URL for `sku`.
    pub fn product_url(&self, sku: &str) -> String {
        self.url("product", sku)
    }
}

/// Answers page-URL, self-link and availability questions for SKUs.
#[derive(Clone)]
pub struct SkuResolver {
    fetcher: Arc<dyn Fetch>,
    endpoints: ApiEndpoints,
}

impl SkuResolver {
    pub fn new(fetcher: Arc<dyn Fetch>, endpoints: ApiEndpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Raw catalog lookup body; empty on transport failure.
    async fn catalog_body(&self, sku: &str) -> String {
        fetch_text_or_empty(self.fetcher.as_ref(), &self.endpoints.catalog_url(sku)).await
    }

    /// Raw product lookup body; empty on transport failure.
    async fn product_body(&self, sku: &str) -> String {
        fetch_text_or_empty(self.fetcher.as_ref(), &self.endpoints.product_url(sku)).await
    }

    /// Canonical product page URL for `sku`.
    pub async fn resolve_product_url(&self, sku: &str) -> SkuLookup {
        lookup::product_url(&self.catalog_body(sku).await)
    }

    /// API self-link (`_links.self.href`) for `sku`.
    pub async fn resolve_product_endpoint(&self, sku: &str) -> SkuLookup {
        lookup::product_endpoint(&self.catalog_body(sku).await)
    }

    /// Page URL and self-link from one catalog request.
    pub async fn resolve_product_link(&self, sku: &str) -> ProductLink {
        let body = self.catalog_body(sku).await;
        ProductLink {
            url: lookup::product_url(&body),
            endpoint: lookup::product_endpoint(&body),
        }
    }

    /// Whether `sku` can be ordered online.
    ///
    /// An upstream error (unknown SKU) reads as unavailable; callers cannot
    /// tell the two apart.
    pub async fn resolve_availability(&self, sku: &str) -> AvailabilityRecord {
        availability::for_sku(&self.product_body(sku).await, sku)
    }

    /// Availability of every style bundled in the product lookup for `sku`.
    ///
    /// `None` when upstream answered with an error, unlike
    /// [`resolve_availability`](Self::resolve_availability) which reports
    /// `false` in that case.
    pub async fn resolve_family_availability(&self, sku: &str) -> Option<Vec<AvailabilityRecord>> {
        availability::for_family(&self.product_body(sku).await)
    }
}

/// Decode a body, treating anything undecodable as absent.
fn decode(body: &str) -> Option<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Response body is not JSON ({} bytes): {}", body.len(), e);
            None
        }
    }
}
