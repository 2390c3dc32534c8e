//! CLI command implementations.

pub mod config_cmd;
pub mod discover;
pub mod serve;
pub mod sku;

use std::sync::Arc;

use crate::config::Settings;
use crate::scrapers::{Fetch, HttpClient};

/// Shared fetcher for one command invocation.
fn fetcher(settings: &Settings) -> anyhow::Result<Arc<dyn Fetch>> {
    Ok(Arc::new(HttpClient::new(settings.fetch_options())?))
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
