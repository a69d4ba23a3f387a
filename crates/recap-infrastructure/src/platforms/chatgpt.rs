//! ChatGPT platform adapter.

use recap_core::conversation::ObservedMessage;
use recap_core::platform::PlatformAdapter;
use regex::Regex;

/// Adapter for chatgpt.com / chat.openai.com conversation pages.
pub struct ChatGptAdapter {
    url_pattern: Regex,
}

impl ChatGptAdapter {
    pub fn new() -> Self {
        Self {
            url_pattern: Regex::new(
                r"^https://(?:chat\.openai\.com|chatgpt\.com)/c/([A-Za-z0-9-]+)",
            )
            .expect("static pattern"),
        }
    }
}

impl Default for ChatGptAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for ChatGptAdapter {
    fn platform(&self) -> &str {
        "chatgpt"
    }

    fn validate_url(&self, url: &str) -> bool {
        self.url_pattern.is_match(url)
    }

    fn extract_conversation_id(&self, url: &str) -> Option<String> {
        let captures = self.url_pattern.captures(url)?;
        Some(format!("chatgpt-{}", &captures[1]))
    }

    fn extract_messages(&self, raw: &serde_json::Value) -> Vec<ObservedMessage> {
        super::parse_rows(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validates_both_hosts() {
        let adapter = ChatGptAdapter::new();
        assert!(adapter.validate_url("https://chatgpt.com/c/abc-123"));
        assert!(adapter.validate_url("https://chat.openai.com/c/abc-123"));
        assert!(!adapter.validate_url("https://chatgpt.com/"));
        assert!(!adapter.validate_url("https://claude.ai/chat/abc"));
    }

    #[test]
    fn test_extracts_namespaced_conversation_id() {
        let adapter = ChatGptAdapter::new();
        assert_eq!(
            adapter.extract_conversation_id("https://chatgpt.com/c/abc-123?model=x"),
            Some("chatgpt-abc-123".to_string())
        );
        assert_eq!(adapter.extract_conversation_id("https://chatgpt.com/"), None);
    }
}
