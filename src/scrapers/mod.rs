//! Network access for catalog pages and the catalog API.

mod http_client;

pub use http_client::{
    random_referer, random_user_agent, Fetch, FetchError, FetchOptions, FetchedPage, HttpClient,
    UserAgentMode, DEFAULT_REFERERS, IMPERSONATE_USER_AGENTS,
};

/// Fetch `url` and return its body as text, or an empty string on transport
/// failure.
///
/// Used by callers whose contract is "empty result on failure" rather than
/// an error.
pub async fn fetch_text_or_empty(fetcher: &dyn Fetch, url: &str) -> String {
    match fetcher.fetch(url).await {
        Ok(page) => page.text(),
        Err(e) => {
            tracing::warn!("Fetch of {} failed, continuing with empty body: {}", url, e);
            String::new()
        }
    }
}
