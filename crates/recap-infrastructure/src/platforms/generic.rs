//! Catch-all adapter for platforms without a dedicated implementation.

use recap_core::conversation::ObservedMessage;
use recap_core::normalize::content_hash;
use recap_core::platform::PlatformAdapter;

/// Fallback adapter: accepts any http(s) page and derives the conversation
/// id from a hash of the URL (query and fragment stripped, so reloads of
/// the same page land in the same conversation).
#[derive(Default)]
pub struct GenericAdapter;

impl GenericAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformAdapter for GenericAdapter {
    fn platform(&self) -> &str {
        "generic"
    }

    fn validate_url(&self, url: &str) -> bool {
        url.starts_with("https://") || url.starts_with("http://")
    }

    fn extract_conversation_id(&self, url: &str) -> Option<String> {
        if !self.validate_url(url) {
            return None;
        }
        let base = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .trim_end_matches('/');
        Some(format!("generic-{:x}", content_hash(base)))
    }

    fn extract_messages(&self, raw: &serde_json::Value) -> Vec<ObservedMessage> {
        super::parse_rows(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_stable_across_query_and_fragment() {
        let adapter = GenericAdapter::new();
        let a = adapter.extract_conversation_id("https://example.com/chat/1");
        let b = adapter.extract_conversation_id("https://example.com/chat/1?tab=2#bottom");
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let adapter = GenericAdapter::new();
        assert!(!adapter.validate_url("file:///tmp/page.html"));
        assert_eq!(adapter.extract_conversation_id("ftp://host/x"), None);
    }

    #[test]
    fn test_distinct_pages_get_distinct_ids() {
        let adapter = GenericAdapter::new();
        assert_ne!(
            adapter.extract_conversation_id("https://example.com/chat/1"),
            adapter.extract_conversation_id("https://example.com/chat/2")
        );
    }
}
