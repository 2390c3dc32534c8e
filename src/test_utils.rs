//! Canned fetcher for exercising fetch-dependent code without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::scrapers::{Fetch, FetchError, FetchedPage};

/// Serves fixed bodies keyed by URL; unknown URLs fail like a dead host.
#[derive(Default)]
pub struct CannedFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage::new(url, StatusCode::OK, body.as_bytes())),
            // An unparseable URL is the cheapest way to get a real FetchError.
            None => Err(FetchError::InvalidUrl {
                url: url.to_string(),
                source: url::ParseError::EmptyHost,
            }),
        }
    }
}
