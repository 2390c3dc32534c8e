//! Catalog discovery commands (regions, categories, products).

use console::style;

use super::{fetcher, print_json};
use crate::catalog::{resolve_route, CatalogDiscovery};
use crate::config::Settings;

fn discovery(settings: &Settings) -> anyhow::Result<CatalogDiscovery> {
    discovery_from(settings, &settings.dispatch_url)
}

fn discovery_from(settings: &Settings, dispatch_url: &str) -> anyhow::Result<CatalogDiscovery> {
    Ok(CatalogDiscovery::with_dispatch_url(
        fetcher(settings)?,
        dispatch_url,
    ))
}

fn print_empty(what: &str, url: &str) {
    eprintln!(
        "{} No {} found at {}",
        style("!").yellow(),
        what,
        style(url).dim()
    );
}

/// List regional storefronts.
pub async fn cmd_regions(settings: &Settings, url: Option<&str>, json: bool) -> anyhow::Result<()> {
    let discovery = discovery_from(settings, url.unwrap_or(settings.dispatch_url.as_str()))?;
    let regions = discovery.regions().await;

    if json {
        return print_json(&regions);
    }
    if regions.is_empty() {
        print_empty("regions", discovery.dispatch_url());
        return Ok(());
    }
    for region in &regions {
        println!("{:<10} {}", style(&region.code).bold(), region.url);
    }
    Ok(())
}

/// List main navigation categories.
pub async fn cmd_categories(settings: &Settings, url: &str, json: bool) -> anyhow::Result<()> {
    let categories = discovery(settings)?.categories(url).await;

    if json {
        return print_json(&categories);
    }
    if categories.is_empty() {
        print_empty("categories", url);
        return Ok(());
    }
    for category in &categories {
        if category.url.is_empty() {
            println!("{}", category.name);
        } else {
            println!(
                "{}  {}",
                category.name,
                style(resolve_route(url, &category.url)).dim()
            );
        }
    }
    Ok(())
}

/// List subcategories under `category`.
pub async fn cmd_subcategories(
    settings: &Settings,
    category: &str,
    url: &str,
    json: bool,
) -> anyhow::Result<()> {
    let subcategories = discovery(settings)?.subcategories(category, url).await;

    if json {
        return print_json(&subcategories);
    }
    if subcategories.is_empty() {
        print_empty(&format!("subcategories under {:?}", category), url);
        return Ok(());
    }
    for sub in &subcategories {
        println!("{}  {}", sub.name, style(resolve_route(url, &sub.url)).dim());
    }
    Ok(())
}

/// List products (routes or images) of a subcategory page.
pub async fn cmd_products(
    settings: &Settings,
    url: &str,
    images: bool,
    json: bool,
) -> anyhow::Result<()> {
    let discovery = discovery(settings)?;

    if images {
        let products = discovery.product_images(url).await;
        if json {
            return print_json(&products);
        }
        if products.is_empty() {
            print_empty("product images", url);
        }
        for product in &products {
            println!("{}  {}", product.name, style(&product.url).dim());
        }
    } else {
        let products = discovery.product_routes(url).await;
        if json {
            return print_json(&products);
        }
        if products.is_empty() {
            print_empty("products", url);
        }
        for product in &products {
            println!(
                "{}  {}",
                product.name,
                style(resolve_route(url, &product.route)).dim()
            );
        }
    }
    Ok(())
}
