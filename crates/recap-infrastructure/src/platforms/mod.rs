//! Concrete platform adapters and the default dispatch table.
//!
//! Each adapter is stateless and independent: it validates page URLs for
//! its site, derives the stable conversation id from the URL structure, and
//! maps raw capture payload rows into ordered message observations. The raw
//! payload is whatever the scraping layer extracted from the page — the
//! adapters never see DOM markup.

mod chatgpt;
mod claude;
mod generic;

pub use chatgpt::ChatGptAdapter;
pub use claude::ClaudeAdapter;
pub use generic::GenericAdapter;

use recap_core::conversation::{ObservedMessage, Sender};
use recap_core::platform::AdapterRegistry;
use std::sync::Arc;

/// Builds the default dispatch table.
///
/// The generic adapter is registered last so site-specific adapters win URL
/// dispatch.
pub fn default_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(ChatGptAdapter::new()));
    registry.register(Arc::new(ClaudeAdapter::new()));
    registry.register(Arc::new(GenericAdapter::new()));
    registry
}

/// Maps an array of capture payload rows into observations.
///
/// Accepted row shape:
/// `{ id?, sender|role, content|text, thinking?, position? }`.
/// Rows that are not objects are skipped; missing positions fall back to
/// the row index.
pub(crate) fn parse_rows(raw: &serde_json::Value) -> Vec<ObservedMessage> {
    let Some(rows) = raw.as_array() else {
        return Vec::new();
    };

    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let obj = row.as_object()?;

            let sender = obj
                .get("sender")
                .or_else(|| obj.get("role"))
                .and_then(|v| v.as_str())
                .map(parse_sender)
                .unwrap_or(Sender::Unknown);

            let content = obj
                .get("content")
                .or_else(|| obj.get("text"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            let position = obj
                .get("position")
                .and_then(|v| v.as_u64())
                .map(|p| p as usize)
                .unwrap_or(index);

            let mut observed = ObservedMessage::new(sender, content, position);
            if let Some(id) = obj.get("id").and_then(|v| v.as_str()) {
                if !id.is_empty() {
                    observed = observed.with_id(id);
                }
            }
            if let Some(thinking) = obj.get("thinking").and_then(|v| v.as_str()) {
                observed = observed.with_thinking(thinking);
            }
            Some(observed)
        })
        .collect()
}

fn parse_sender(tag: &str) -> Sender {
    match tag {
        "user" | "human" => Sender::User,
        "ai" | "assistant" => Sender::Ai,
        _ => Sender::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rows_maps_fields() {
        let raw = json!([
            { "id": "m1", "sender": "user", "content": "Hello", "position": 0 },
            { "role": "assistant", "text": "Hi!", "thinking": "greet back" }
        ]);

        let rows = parse_rows(&raw);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id.as_deref(), Some("m1"));
        assert_eq!(rows[0].sender, Sender::User);
        assert_eq!(rows[1].sender, Sender::Ai);
        assert_eq!(rows[1].content, "Hi!");
        assert_eq!(rows[1].thinking.as_deref(), Some("greet back"));
        assert_eq!(rows[1].position, 1);
    }

    #[test]
    fn test_parse_rows_skips_non_objects() {
        let raw = json!([ "junk", { "sender": "user", "content": "kept" } ]);
        let rows = parse_rows(&raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "kept");
    }

    #[test]
    fn test_parse_rows_handles_non_array_payload() {
        assert!(parse_rows(&json!({ "not": "an array" })).is_empty());
        assert!(parse_rows(&json!(null)).is_empty());
    }

    #[test]
    fn test_unknown_sender_tag() {
        let raw = json!([ { "sender": "tool", "content": "output" } ]);
        let rows = parse_rows(&raw);
        assert_eq!(rows[0].sender, Sender::Unknown);
    }

    #[test]
    fn test_default_registry_dispatch() {
        let registry = default_registry();
        assert_eq!(registry.platforms(), vec!["chatgpt", "claude", "generic"]);

        let adapter = registry
            .resolve_url("https://chatgpt.com/c/abc-123")
            .unwrap();
        assert_eq!(adapter.platform(), "chatgpt");

        let adapter = registry
            .resolve_url("https://claude.ai/chat/def-456")
            .unwrap();
        assert_eq!(adapter.platform(), "claude");

        // Anything else falls through to the generic adapter.
        let adapter = registry
            .resolve_url("https://example.com/some/chat")
            .unwrap();
        assert_eq!(adapter.platform(), "generic");
    }
}
