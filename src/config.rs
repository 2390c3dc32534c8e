//! Configuration management for skuwatch using the prefer crate.
//!
//! Precedence, lowest to highest: built-in defaults, config file
//! (`--config` or discovered by prefer), environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::DEFAULT_DISPATCH_URL;
use crate::resolver::{ApiEndpoints, DEFAULT_API_BASE, DEFAULT_API_LOCALE};
use crate::scrapers::{FetchOptions, UserAgentMode};

/// Default listen address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Errors raised while reading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Catalog API host.
    pub api_base_url: String,
    /// Locale segment in API paths.
    pub api_locale: String,
    /// Page listing every regional storefront.
    pub dispatch_url: String,
    /// User agent config: None or "impersonate" rotates browser agents.
    pub user_agent: Option<String>,
    /// Referer pool; empty uses the built-in list.
    pub referers: Vec<String>,
    /// Request timeout in seconds; `None` leaves the transport default.
    pub request_timeout: Option<u64>,
    /// Listen address for the availability service.
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            api_locale: DEFAULT_API_LOCALE.to_string(),
            dispatch_url: DEFAULT_DISPATCH_URL.to_string(),
            user_agent: None,
            referers: Vec::new(),
            request_timeout: None,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// Options for the shared HTTP client.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.request_timeout.map(Duration::from_secs),
            user_agent: UserAgentMode::from_config(self.user_agent.as_deref()),
            referers: self.referers.clone(),
        }
    }

    /// Catalog API location.
    pub fn api_endpoints(&self) -> ApiEndpoints {
        ApiEndpoints {
            base_url: self.api_base_url.clone(),
            locale: self.api_locale.clone(),
        }
    }

    /// Apply `SKUWATCH_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|s| !s.is_empty());

        if let Some(base) = var("SKUWATCH_API_BASE") {
            tracing::debug!("Using SKUWATCH_API_BASE from environment: {}", base);
            self.api_base_url = base;
        }
        if let Some(locale) = var("SKUWATCH_API_LOCALE") {
            self.api_locale = locale;
        }
        if let Some(url) = var("SKUWATCH_DISPATCH_URL") {
            self.dispatch_url = url;
        }
        if let Some(ua) = var("SKUWATCH_USER_AGENT") {
            self.user_agent = Some(ua);
        }
        if let Some(bind) = var("SKUWATCH_BIND") {
            self.bind = bind;
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referers: Vec<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when nothing is found or the file is invalid.
    pub async fn load() -> Self {
        match prefer::load("skuwatch").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}; using defaults", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports TOML, YAML and JSON based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let mut config = Self::parse(path, &contents)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_err("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| parse_err("YAML", e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| parse_err("JSON", e.to_string())),
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref base) = self.api_base_url {
            settings.api_base_url = base.clone();
        }
        if let Some(ref locale) = self.api_locale {
            settings.api_locale = locale.clone();
        }
        if let Some(ref url) = self.dispatch_url {
            settings.dispatch_url = url.clone();
        }
        if let Some(ref ua) = self.user_agent {
            settings.user_agent = Some(ua.clone());
        }
        if !self.referers.is_empty() {
            settings.referers = self.referers.clone();
        }
        if self.request_timeout.is_some() {
            settings.request_timeout = self.request_timeout;
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = match options.config_path {
        Some(ref path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
            Config::load_from_path(&expanded).await.unwrap_or_else(|e| {
                tracing::warn!("{}; using defaults", e);
                Config::default()
            })
        }
        None => Config::load().await,
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings.apply_env();

    (settings, config)
}
