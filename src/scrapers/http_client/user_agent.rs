//! Client identity rotation (user agent and referer) for outgoing requests.

/// Real browser user agents used when impersonating.
pub const IMPERSONATE_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    // Chrome on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0",
    // Firefox on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
    // Safari on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
    // Safari on iPhone
    "Mozilla/5.0 (iPhone; CPU iPhone OS 18_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Mobile/15E148 Safari/604.1",
    // Edge on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
];

/// Referers presented when no custom pool is configured.
pub const DEFAULT_REFERERS: &[&str] = &[
    "https://www.google.com/",
    "https://www.bing.com/",
    "https://duckduckgo.com/",
    "https://www.louisvuitton.com/",
    "https://ca.louisvuitton.com/eng-ca/homepage",
];

/// Pick an index into a pool of `len` entries.
///
/// Seeded from the clock on every call so two consecutive requests rarely
/// share an identity.
fn pick(len: usize) -> usize {
    use std::time::SystemTime;
    if len == 0 {
        return 0;
    }
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as usize)
        .unwrap_or(0);
    // Low bits of the nanosecond clock are coarse on some platforms.
    (nanos ^ (nanos >> 7)) % len
}

/// Get a random user agent for impersonate mode.
pub fn random_user_agent() -> &'static str {
    IMPERSONATE_USER_AGENTS[pick(IMPERSONATE_USER_AGENTS.len())]
}

/// Get a random referer from `pool`, falling back to the built-in list.
pub fn random_referer(pool: &[String]) -> String {
    if pool.is_empty() {
        DEFAULT_REFERERS[pick(DEFAULT_REFERERS.len())].to_string()
    } else {
        pool[pick(pool.len())].clone()
    }
}

/// How the user agent is chosen for each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAgentMode {
    /// A fresh browser user agent per request.
    Impersonate,
    /// Always the same caller-supplied string.
    Fixed(String),
}

impl UserAgentMode {
    /// Resolve from a config value.
    /// - None or "impersonate" => rotate real browser user agents
    /// - other => custom user agent string
    pub fn from_config(config: Option<&str>) -> Self {
        match config {
            None | Some("impersonate") => Self::Impersonate,
            Some(custom) => Self::Fixed(custom.to_string()),
        }
    }

    /// User agent for the next request.
    pub fn next(&self) -> String {
        match self {
            Self::Impersonate => random_user_agent().to_string(),
            Self::Fixed(ua) => ua.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_impersonates() {
        let mode = UserAgentMode::from_config(None);
        assert_eq!(mode, UserAgentMode::Impersonate);
        assert!(mode.next().contains("Mozilla"));
    }

    #[test]
    fn test_mode_explicit_impersonate() {
        let mode = UserAgentMode::from_config(Some("impersonate"));
        assert!(IMPERSONATE_USER_AGENTS.contains(&mode.next().as_str()));
    }

    #[test]
    fn test_mode_custom() {
        let mode = UserAgentMode::from_config(Some("MyBot/1.0"));
        assert_eq!(mode.next(), "MyBot/1.0");
    }

    #[test]
    fn test_random_referer_uses_pool() {
        let pool = vec!["https://example.com/a".to_string()];
        assert_eq!(random_referer(&pool), "https://example.com/a");
    }

    #[test]
    fn test_random_referer_default_pool() {
        let referer = random_referer(&[]);
        assert!(DEFAULT_REFERERS.contains(&referer.as_str()));
    }

    #[test]
    fn test_pick_empty_pool() {
        assert_eq!(pick(0), 0);
    }
}
