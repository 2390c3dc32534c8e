//! Records produced by the extraction stages and the SKU resolver.
//!
//! Every record is a projection of one fetched document. None of them hold
//! network resources or reference each other; the region → category →
//! subcategory → product hierarchy exists only through the URLs callers pass
//! from one stage to the next.

use serde::{Deserialize, Serialize};

/// A storefront region and its landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Territory code taken from the fourth `/`-separated segment of `url`.
    pub code: String,
    pub url: String,
}

/// A navigation category or subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Display label; empty when the markup carries no text.
    pub name: String,
    /// Route to the category page, relative or absolute.
    pub url: String,
}

/// A product card's name and the route to its page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRouteRecord {
    pub name: String,
    pub route: String,
}

/// A product card's name and its image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImageRecord {
    pub name: String,
    pub url: String,
}

/// Online availability of one SKU, as served to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    #[serde(rename = "Sku")]
    pub sku: String,
    #[serde(rename = "Available")]
    pub available: bool,
}

impl AvailabilityRecord {
    pub fn new(sku: impl Into<String>, available: bool) -> Self {
        Self {
            sku: sku.into(),
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_wire_shape() {
        let record = AvailabilityRecord::new("X", true);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Sku":"X","Available":true}"#);

        let back: AvailabilityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
