//! Marker-class selectors for the storefront markup.
//!
//! The class names are the only contract with the upstream pages. When the
//! site changes, this is the file to update.

use scraper::Selector;
use std::sync::LazyLock;

fn compile(css: &str) -> Selector {
    // Only ever called with the literals below.
    Selector::parse(css).unwrap_or_else(|e| panic!("bad built-in selector {css:?}: {e}"))
}

/// Every list item (region and category stages scan these).
pub static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| compile("li"));

/// Top-level nav list items.
pub static PRESENTATION_ITEM: LazyLock<Selector> =
    LazyLock::new(|| compile(r#"li[role="presentation"]"#));

/// Region links on the dispatch page.
pub static DISPATCH_LINK: LazyLock<Selector> = LazyLock::new(|| compile(".lvdispatch-link"));

/// Main navigation entries.
pub static MAIN_NAV_ITEM: LazyLock<Selector> =
    LazyLock::new(|| compile(".lv-header-main-nav__item"));

/// Label inside a nav entry.
pub static NAV_LABEL: LazyLock<Selector> = LazyLock::new(|| compile("span"));

/// Flyout panel holding a category's children.
pub static NAV_PANEL: LazyLock<Selector> = LazyLock::new(|| compile(".lv-header-main-nav-panel"));

pub static NAV_CHILD_ITEM: LazyLock<Selector> =
    LazyLock::new(|| compile(".lv-header-main-nav-child__item"));

pub static NAV_CHILD_LINK: LazyLock<Selector> =
    LazyLock::new(|| compile(".lv-header-main-nav-child__link"));

/// Product grid on a subcategory page.
pub static PRODUCT_LIST: LazyLock<Selector> = LazyLock::new(|| compile("ul.lv-list"));

pub static PRODUCT_CARD: LazyLock<Selector> = LazyLock::new(|| compile(".lv-product-card"));

pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| compile("img"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_compile() {
        for sel in [
            &LIST_ITEM,
            &PRESENTATION_ITEM,
            &DISPATCH_LINK,
            &MAIN_NAV_ITEM,
            &NAV_LABEL,
            &NAV_PANEL,
            &NAV_CHILD_ITEM,
            &NAV_CHILD_LINK,
            &PRODUCT_LIST,
            &PRODUCT_CARD,
            &IMAGE,
        ] {
            LazyLock::force(sel);
        }
    }
}
