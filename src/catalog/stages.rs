//! The four page-level extraction stages.
//!
//! Each stage is a pure function over a parsed document. A missing marker
//! class, attribute or label drops the smallest unit it affects (one link,
//! one card) and never fails the stage.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::records::{CategoryRecord, ProductImageRecord, ProductRouteRecord, RegionRecord};
use super::selectors;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").unwrap_or_else(|e| panic!("bad built-in pattern: {e}"))
});

/// Index of the path segment holding the region code in a dispatch link,
/// e.g. `https://ca.louisvuitton.com/eng-ca/homepage` → `eng-ca`.
const REGION_SEGMENT: usize = 3;

/// Concatenated text of an element, like a browser's `textContent`.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Collapse whitespace runs to one space and trim.
fn normalize_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Label of a main-nav entry: the text of its `span` descendants, trimmed.
fn nav_label(item: ElementRef<'_>) -> String {
    item.select(&selectors::NAV_LABEL)
        .map(text_of)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Region codes and landing URLs from the dispatch page.
pub fn extract_regions(doc: &Html) -> Vec<RegionRecord> {
    let mut regions = Vec::new();

    for li in doc.select(&selectors::LIST_ITEM) {
        for link in li.select(&selectors::DISPATCH_LINK) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let Some(code) = href.split('/').nth(REGION_SEGMENT) else {
                tracing::debug!("Dispatch link without region segment: {}", href);
                continue;
            };
            regions.push(RegionRecord {
                code: code.to_string(),
                url: href.to_string(),
            });
        }
    }

    regions
}

/// Main navigation categories of a region landing page, in document order.
///
/// `url` is the entry's own `href` when it is a link; most entries are
/// buttons that open a flyout, in which case it is empty.
pub fn extract_categories(doc: &Html) -> Vec<CategoryRecord> {
    let mut categories = Vec::new();

    for li in doc.select(&selectors::LIST_ITEM) {
        for item in li.select(&selectors::MAIN_NAV_ITEM) {
            categories.push(CategoryRecord {
                name: nav_label(item),
                url: item.value().attr("href").unwrap_or_default().to_string(),
            });
        }
    }

    categories
}

/// Subcategory links under the nav entry labelled exactly `category`.
///
/// The comparison is case-sensitive and `category` is used verbatim. No
/// matching entry means an empty result.
pub fn extract_subcategories(doc: &Html, category: &str) -> Vec<CategoryRecord> {
    let mut subcategories = Vec::new();

    for li in doc.select(&selectors::PRESENTATION_ITEM) {
        for item in li.select(&selectors::MAIN_NAV_ITEM) {
            if nav_label(item) != category {
                continue;
            }
            let Some(parent) = item.parent().and_then(ElementRef::wrap) else {
                continue;
            };

            for panel in parent.select(&selectors::NAV_PANEL) {
                for child in panel.select(&selectors::NAV_CHILD_ITEM) {
                    let Some(link) = child.select(&selectors::NAV_CHILD_LINK).next() else {
                        continue;
                    };
                    let Some(href) = link.value().attr("href") else {
                        continue;
                    };
                    subcategories.push(CategoryRecord {
                        name: normalize_whitespace(&text_of(link)),
                        url: href.to_string(),
                    });
                }
            }
        }
    }

    subcategories
}

/// Product cards inside every product list of the page.
fn product_cards(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.select(&selectors::PRODUCT_LIST)
        .flat_map(|list| list.select(&selectors::PRODUCT_CARD))
}

/// Card text with image markup stripped.
///
/// Card images sit inside `<noscript>`, which the parser keeps as raw text,
/// so the card's text can contain literal `<img ...>` tags. Re-parsing the
/// text as a fragment and keeping only its text nodes drops them.
fn card_fragment(card: ElementRef<'_>) -> Html {
    Html::parse_fragment(&text_of(card))
}

fn card_name(fragment: &Html) -> String {
    normalize_whitespace(&fragment.root_element().text().collect::<String>())
}

/// First image source of a card, looking at real `img` elements before the
/// ones embedded as text.
fn card_image(card: ElementRef<'_>, fragment: &Html) -> Option<String> {
    if let Some(src) = card
        .select(&selectors::IMAGE)
        .find_map(|img| img.value().attr("src"))
    {
        return Some(src.to_string());
    }
    fragment
        .select(&selectors::IMAGE)
        .find_map(|img| img.value().attr("src").map(str::to_string))
}

/// Product names and routes of a subcategory page. Cards without an `href`
/// are skipped.
pub fn extract_product_routes(doc: &Html) -> Vec<ProductRouteRecord> {
    product_cards(doc)
        .filter_map(|card| {
            let route = card.value().attr("href")?;
            Some(ProductRouteRecord {
                name: card_name(&card_fragment(card)),
                route: route.to_string(),
            })
        })
        .collect()
}

/// Product names and image URLs of a subcategory page. Cards without an
/// image are skipped.
pub fn extract_product_images(doc: &Html) -> Vec<ProductImageRecord> {
    product_cards(doc)
        .filter_map(|card| {
            let fragment = card_fragment(card);
            let url = card_image(card, &fragment)?;
            Some(ProductImageRecord {
                name: card_name(&fragment),
                url,
            })
        })
        .collect()
}
