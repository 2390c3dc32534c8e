//! Configuration commands.

use console::style;

use super::print_json;
use crate::config::{Config, Settings};

/// Show the effective settings and where they came from.
pub fn cmd_config_show(settings: &Settings, config: &Config, json: bool) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());

    let effective = serde_json::json!({
        "source": source,
        "api_base_url": settings.api_base_url,
        "api_locale": settings.api_locale,
        "dispatch_url": settings.dispatch_url,
        "user_agent": settings.user_agent.as_deref().unwrap_or("impersonate"),
        "referers": settings.referers,
        "request_timeout": settings.request_timeout,
        "bind": settings.bind,
    });

    if json {
        return print_json(&effective);
    }

    println!("{} Config: {}", style("→").cyan(), source);
    println!("  {:<16} {}", "api_base_url", settings.api_base_url);
    println!("  {:<16} {}", "api_locale", settings.api_locale);
    println!("  {:<16} {}", "dispatch_url", settings.dispatch_url);
    println!(
        "  {:<16} {}",
        "user_agent",
        settings.user_agent.as_deref().unwrap_or("impersonate")
    );
    println!(
        "  {:<16} {}",
        "referers",
        if settings.referers.is_empty() {
            "built-in".to_string()
        } else {
            settings.referers.join(", ")
        }
    );
    match settings.request_timeout {
        Some(secs) => println!("  {:<16} {}s", "request_timeout", secs),
        None => println!("  {:<16} none", "request_timeout"),
    }
    println!("  {:<16} {}", "bind", settings.bind);
    Ok(())
}
