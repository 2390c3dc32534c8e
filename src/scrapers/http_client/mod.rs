//! HTTP client with per-request identity rotation.

mod response;
mod user_agent;

pub use response::FetchedPage;
pub use user_agent::{
    random_referer, random_user_agent, UserAgentMode, DEFAULT_REFERERS, IMPERSONATE_USER_AGENTS,
};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{REFERER, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while performing a fetch.
///
/// These are transport problems only; a page that arrives but cannot be
/// interpreted is never a `FetchError`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Something that can GET a URL and hand back the raw page.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Options for building an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Overall request timeout; `None` leaves reqwest's default (no limit).
    pub timeout: Option<Duration>,
    pub user_agent: UserAgentMode,
    /// Referer pool; empty means the built-in list.
    pub referers: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: UserAgentMode::Impersonate,
            referers: Vec::new(),
        }
    }
}

/// HTTP client shared by every stage and resolver call.
///
/// The underlying connection pool is built once; identity headers are chosen
/// fresh on every request. No cookie store is kept, so nothing set by one
/// response is sent with the next request.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: UserAgentMode,
    referers: Vec<String>,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let mut builder = Client::builder().gzip(true).brotli(true);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            user_agent: options.user_agent,
            referers: options.referers,
        })
    }

    /// Identity headers for the next request.
    fn next_identity(&self) -> (String, String) {
        (self.user_agent.next(), random_referer(&self.referers))
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = url::Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let (user_agent, referer) = self.next_identity();
        info!("Visiting {}", parsed);
        debug!("Identity for {}: ua={:?} referer={}", url, user_agent, referer);

        let start = Instant::now();
        let response = self
            .client
            .get(parsed)
            .header(USER_AGENT, user_agent)
            .header(REFERER, referer)
            .send()
            .await
            .map_err(|source| {
                warn!("Request URL: {} failed: {}", url, source);
                FetchError::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| {
            warn!("Reading body of {} failed: {}", url, source);
            FetchError::Body {
                url: url.to_string(),
                source,
            }
        })?;

        let page = FetchedPage::new(url, status, body.to_vec());
        if !page.is_success() {
            warn!("Request URL: {} answered with {}", url, page.status);
        }
        debug!(
            "Fetched {} ({} bytes, status {}) in {:?}",
            url,
            page.body.len(),
            page.status,
            start.elapsed()
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(user_agent: UserAgentMode, referers: Vec<String>) -> HttpClient {
        HttpClient::new(FetchOptions {
            user_agent,
            referers,
            ..FetchOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_identity_uses_fixed_agent_and_pool() {
        let client = client(
            UserAgentMode::Fixed("Probe/1.0".to_string()),
            vec!["https://ref.example/".to_string()],
        );
        let (ua, referer) = client.next_identity();
        assert_eq!(ua, "Probe/1.0");
        assert_eq!(referer, "https://ref.example/");
    }

    #[test]
    fn test_identity_impersonates_by_default() {
        let client = client(UserAgentMode::Impersonate, Vec::new());
        let (ua, referer) = client.next_identity();
        assert!(IMPERSONATE_USER_AGENTS.contains(&ua.as_str()));
        assert!(DEFAULT_REFERERS.contains(&referer.as_str()));
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_side_error() {
        let client = client(UserAgentMode::Impersonate, Vec::new());
        let err = client.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    /// Answer `responses` connections with a tracking cookie and record the
    /// `Cookie` header each request carried.
    async fn cookie_setting_server(
        responses: usize,
    ) -> (String, tokio::task::JoinHandle<Vec<Option<String>>>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            for _ in 0..responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..n]);
                }
                let head = String::from_utf8_lossy(&head).to_string();
                seen.push(
                    head.lines()
                        .find(|l| l.to_ascii_lowercase().starts_with("cookie:"))
                        .map(str::to_string),
                );
                stream
                    .write_all(
                        b"HTTP/1.1 200 OK\r\nSet-Cookie: visitor=abc123; Path=/\r\n\
                          Content-Length: 2\r\nConnection: close\r\n\r\nok",
                    )
                    .await
                    .unwrap();
                let _ = stream.shutdown().await;
            }
            seen
        });

        (url, handle)
    }

    #[tokio::test]
    async fn test_cookies_are_not_carried_between_requests() {
        let (url, server) = cookie_setting_server(2).await;
        let client = client(UserAgentMode::Impersonate, Vec::new());

        let first = client.fetch(&url).await.unwrap();
        assert_eq!(first.text(), "ok");
        client.fetch(&url).await.unwrap();

        assert_eq!(server.await.unwrap(), vec![None, None]);
    }

    #[test]
    fn test_no_timeout_by_default() {
        assert_eq!(FetchOptions::default().timeout, None);
    }
}
