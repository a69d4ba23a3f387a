//! Claude platform adapter.

use recap_core::conversation::ObservedMessage;
use recap_core::platform::PlatformAdapter;
use regex::Regex;

/// Adapter for claude.ai conversation pages.
pub struct ClaudeAdapter {
    url_pattern: Regex,
}

impl ClaudeAdapter {
    pub fn new() -> Self {
        Self {
            url_pattern: Regex::new(r"^https://claude\.ai/chat/([A-Za-z0-9-]+)")
                .expect("static pattern"),
        }
    }
}

impl Default for ClaudeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for ClaudeAdapter {
    fn platform(&self) -> &str {
        "claude"
    }

    fn validate_url(&self, url: &str) -> bool {
        self.url_pattern.is_match(url)
    }

    fn extract_conversation_id(&self, url: &str) -> Option<String> {
        let captures = self.url_pattern.captures(url)?;
        Some(format!("claude-{}", &captures[1]))
    }

    fn extract_messages(&self, raw: &serde_json::Value) -> Vec<ObservedMessage> {
        super::parse_rows(raw)
    }
}
