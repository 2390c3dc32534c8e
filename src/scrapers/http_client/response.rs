//! Fetched page wrapper.

use reqwest::StatusCode;

/// Raw result of a single GET.
///
/// Non-2xx responses are still pages: the body is kept and the caller decides
/// what it means.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Build a page from parts (used by canned fetchers as well).
    pub fn new(url: impl Into<String>, status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_success_keeps_body() {
        let page = FetchedPage::new("https://example.com", StatusCode::NOT_FOUND, "gone");
        assert!(!page.is_success());
        assert_eq!(page.text(), "gone");
    }

    #[test]
    fn test_text_is_lossy() {
        let page = FetchedPage::new("u", StatusCode::OK, vec![b'o', b'k', 0xff]);
        assert!(page.text().starts_with("ok"));
    }
}
