//! Conversation domain model.
//!
//! This module contains the core Conversation entity: the durable
//! per-conversation record that reconciliation cycles read and rewrite.

use super::message::{Message, Sender};
use serde::{Deserialize, Serialize};

/// Placeholder title assigned until a real one can be derived.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Maximum number of characters kept when deriving a title from message text.
const TITLE_MAX_CHARS: usize = 50;

/// Aggregate of messages for one chat session on one platform.
///
/// The message list is kept in conversation order (not insertion order) and
/// is only ever replaced wholesale by a reconciliation cycle, so a stored
/// conversation is always internally consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Stable per-browser-conversation identifier, derived from the site URL
    /// structure by the platform adapters.
    pub id: String,
    /// Platform tag, e.g. "chatgpt".
    pub platform: String,
    /// Human-readable title, auto-derived from the first user message.
    pub title: String,
    /// Ordered message list (conversation order).
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Page URL the conversation was captured from.
    #[serde(default)]
    pub url: String,
    /// Timestamp when the conversation was first captured (RFC 3339).
    pub created_at: String,
    /// Timestamp of the last reconciliation that produced changes (RFC 3339).
    pub updated_at: String,
}

impl Conversation {
    /// Creates an empty conversation shell with the placeholder title and
    /// both timestamps set to now.
    pub fn new(id: impl Into<String>, platform: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.into(),
            platform: platform.into(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            url: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether the title is still unset or the placeholder.
    pub fn has_placeholder_title(&self) -> bool {
        self.title.is_empty() || self.title == DEFAULT_TITLE
    }

    /// Derives a title from the first user message, truncated to 50
    /// characters plus an ellipsis.
    ///
    /// Returns `None` when no user message with non-empty content exists.
    pub fn derive_title(&self) -> Option<String> {
        let source = self
            .messages
            .iter()
            .find(|m| m.sender == Sender::User && !m.content.trim().is_empty())?;
        Some(truncate_title(source.content.trim()))
    }

    /// Re-derives the title if it is still the placeholder.
    pub fn refresh_title(&mut self) {
        if self.has_placeholder_title() {
            if let Some(title) = self.derive_title() {
                self.title = title;
            }
        }
    }

    /// Bumps `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

fn truncate_title(content: &str) -> String {
    let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
    if content.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}
