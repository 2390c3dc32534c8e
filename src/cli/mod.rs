//! Command line interface.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "skuwatch")]
#[command(about = "Catalog discovery and SKU stock tracking")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "SKUWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the availability web server
    Serve {
        /// Address to bind to (port, host, or host:port)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// List regional storefronts from the dispatch page
    Regions {
        /// Dispatch page URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
    },

    /// List main navigation categories of a region landing page
    Categories {
        /// Region landing page URL
        url: String,
    },

    /// List subcategories under a navigation category
    Subcategories {
        /// Category label, matched exactly
        category: String,
        /// Region landing page URL
        url: String,
    },

    /// List products of a subcategory page
    Products {
        /// Subcategory page URL (relative routes are resolved against it)
        url: String,
        /// List image URLs instead of product routes
        #[arg(long)]
        images: bool,
    },

    /// Look up a SKU in the catalog API
    Sku {
        #[command(subcommand)]
        command: SkuCommands,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Subcommand)]
enum SkuCommands {
    /// Product page URL
    Url { sku: String },
    /// Product API self-link
    Endpoint { sku: String },
    /// Online availability of the SKU
    Available { sku: String },
    /// Availability of every style bundled with the SKU
    Family { sku: String },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (settings, config) = load_settings_with_options(options).await;
    let json = cli.json;

    match cli.command {
        Commands::Serve { bind } => {
            commands::serve::cmd_serve(&settings, bind.as_deref().unwrap_or(&settings.bind)).await
        }
        Commands::Regions { url } => {
            commands::discover::cmd_regions(&settings, url.as_deref(), json).await
        }
        Commands::Categories { url } => {
            commands::discover::cmd_categories(&settings, &url, json).await
        }
        Commands::Subcategories { category, url } => {
            commands::discover::cmd_subcategories(&settings, &category, &url, json).await
        }
        Commands::Products { url, images } => {
            commands::discover::cmd_products(&settings, &url, images, json).await
        }
        Commands::Sku { command } => match command {
            SkuCommands::Url { sku } => commands::sku::cmd_url(&settings, &sku, json).await,
            SkuCommands::Endpoint { sku } => {
                commands::sku::cmd_endpoint(&settings, &sku, json).await
            }
            SkuCommands::Available { sku } => {
                commands::sku::cmd_available(&settings, &sku, json).await
            }
            SkuCommands::Family { sku } => commands::sku::cmd_family(&settings, &sku, json).await,
        },
        Commands::Config => commands::config_cmd::cmd_config_show(&settings, &config, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sku_family() {
        let cli = Cli::try_parse_from(["skuwatch", "--json", "sku", "family", "M40712"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Sku {
                command: SkuCommands::Family { ref sku }
            } if sku == "M40712"
        ));
    }

    #[test]
    fn test_parse_subcategories_keeps_label_verbatim() {
        let cli = Cli::try_parse_from([
            "skuwatch",
            "subcategories",
            " Women",
            "https://ca.louisvuitton.com/eng-ca/homepage",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Subcategories { ref category, .. } if category == " Women"
        ));
    }
}
