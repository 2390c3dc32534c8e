//! SKU lookup commands.

use console::style;

use super::{fetcher, print_json};
use crate::config::Settings;
use crate::resolver::{SkuLookup, SkuResolver};

fn resolver(settings: &Settings) -> anyhow::Result<SkuResolver> {
    Ok(SkuResolver::new(fetcher(settings)?, settings.api_endpoints()))
}

fn print_lookup(sku: &str, lookup: &SkuLookup, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({ "Sku": sku, "Value": lookup.as_str() }));
    }
    match lookup {
        SkuLookup::Found(value) => println!("{}", value),
        SkuLookup::InvalidSku => eprintln!("{} {}: {}", style("✗").red(), sku, lookup),
        SkuLookup::NotFound => eprintln!("{} {}: nothing returned", style("!").yellow(), sku),
    }
    Ok(())
}

fn availability_label(available: bool) -> console::StyledObject<&'static str> {
    if available {
        style("available").green()
    } else {
        style("unavailable").red()
    }
}

/// Print the product page URL.
pub async fn cmd_url(settings: &Settings, sku: &str, json: bool) -> anyhow::Result<()> {
    let lookup = resolver(settings)?.resolve_product_url(sku).await;
    print_lookup(sku, &lookup, json)
}

/// Print the product API self-link.
pub async fn cmd_endpoint(settings: &Settings, sku: &str, json: bool) -> anyhow::Result<()> {
    let lookup = resolver(settings)?.resolve_product_endpoint(sku).await;
    print_lookup(sku, &lookup, json)
}

/// Print availability of one SKU.
pub async fn cmd_available(settings: &Settings, sku: &str, json: bool) -> anyhow::Result<()> {
    let record = resolver(settings)?.resolve_availability(sku).await;
    if json {
        return print_json(&record);
    }
    println!("{}  {}", style(&record.sku).bold(), availability_label(record.available));
    Ok(())
}

/// Print availability of every style bundled with the SKU.
pub async fn cmd_family(settings: &Settings, sku: &str, json: bool) -> anyhow::Result<()> {
    let family = resolver(settings)?.resolve_family_availability(sku).await;
    if json {
        return print_json(&family);
    }
    match family {
        None => eprintln!("{} {}: upstream rejected the SKU", style("✗").red(), sku),
        Some(records) if records.is_empty() => {
            eprintln!("{} {}: no styles reported", style("!").yellow(), sku)
        }
        Some(records) => {
            for record in &records {
                println!("{}  {}", style(&record.sku).bold(), availability_label(record.available));
            }
        }
    }
    Ok(())
}
