//! Catalog lookup parsing (`skuList` items).

use serde_json::Value;

use super::{decode, SkuLookup, EMPTY_SKU_LIST_MARKER};
use crate::json_nav::{find_value, Nav};

/// Run `pick` over every `skuList` item; the last item that yields a value
/// wins.
fn last_match(body: &str, pick: impl Fn(&Value) -> Option<&str>) -> SkuLookup {
    if body.contains(EMPTY_SKU_LIST_MARKER) {
        return SkuLookup::InvalidSku;
    }
    let Some(root) = decode(body) else {
        return SkuLookup::NotFound;
    };

    Nav::root(&root)
        .field("skuList")
        .items()
        .iter()
        .filter_map(|item| pick(item))
        .last()
        .map(|s| SkuLookup::Found(s.to_string()))
        .unwrap_or(SkuLookup::NotFound)
}

/// `url` of the last `skuList` item that has one.
pub(super) fn product_url(body: &str) -> SkuLookup {
    last_match(body, |item| find_value(item, "url").and_then(Value::as_str))
}

/// `_links.self.href` of the last `skuList` item that has one.
pub(super) fn product_endpoint(body: &str) -> SkuLookup {
    last_match(body, |item| {
        Nav::root(item).field("_links").field("self").field("href").as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_marker_is_invalid() {
        let body = r#"{"skuListSize":0,"skuList":[]}"#;
        assert_eq!(product_url(body), SkuLookup::InvalidSku);
        assert_eq!(product_endpoint(body), SkuLookup::InvalidSku);
    }

    #[test]
    fn test_last_item_wins() {
        let body = r#"{"skuListSize":2,"skuList":[
            {"url":"https://shop.example/first","_links":{"self":{"href":"https://api.example/1"}}},
            {"url":"https://shop.example/second","_links":{"self":{"href":"https://api.example/2"}}}
        ]}"#;
        assert_eq!(
            product_url(body),
            SkuLookup::Found("https://shop.example/second".to_string())
        );
        assert_eq!(
            product_endpoint(body),
            SkuLookup::Found("https://api.example/2".to_string())
        );
    }

    #[test]
    fn test_items_missing_field_do_not_override() {
        let body = r#"{"skuListSize":2,"skuList":[
            {"url":"https://shop.example/only","_links":{"self":{"href":"https://api.example/only"}}},
            {"_links":{"next":{"href":"https://api.example/next"}}}
        ]}"#;
        assert_eq!(product_url(body).as_str(), "https://shop.example/only");
        assert_eq!(product_endpoint(body).as_str(), "https://api.example/only");
    }

    #[test]
    fn test_links_with_absent_self_are_skipped() {
        let body = r#"{"skuListSize":1,"skuList":[{"_links":"not-an-object"}]}"#;
        assert_eq!(product_endpoint(body), SkuLookup::NotFound);
    }

    #[test]
    fn test_undecodable_or_listless_body() {
        assert_eq!(product_url(""), SkuLookup::NotFound);
        assert_eq!(product_url("<html>blocked</html>"), SkuLookup::NotFound);
        assert_eq!(product_endpoint(r#"{"skuListSize":3}"#), SkuLookup::NotFound);
    }
}
