//! Message types for captured conversations.
//!
//! A [`Message`] is one turn of a conversation as reconstructed from the
//! page; an [`ObservedMessage`] (see [`super::observed`]) is the raw shape a
//! scraping adapter hands over before normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a message, as far as the scraping layer could tell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed by the human user.
    User,
    /// Message produced by the AI assistant.
    Ai,
    /// The adapter could not classify the sender.
    #[default]
    Unknown,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sender::User => "user",
            Sender::Ai => "ai",
            Sender::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A single reconciled message within a conversation.
///
/// `id` is the stable identity used by the change-set computer; when an
/// adapter does not supply one, the normalizer derives it deterministically
/// from (sender, content prefix, position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Stable message identity, unique within one conversation.
    pub id: String,
    /// The role of the message sender.
    pub sender: Sender,
    /// Primary text of the message. Defaults to empty, never null.
    #[serde(default)]
    pub content: String,
    /// Auxiliary reasoning text some platforms expose alongside the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    /// 0-based rendering order at capture time. Recomputed by anchor
    /// correction, so not a permanent identity.
    #[serde(default)]
    pub position: usize,
    /// Timestamp when the message was first captured (RFC 3339).
    pub created_at: String,
    /// Timestamp when the message content last changed (RFC 3339).
    pub updated_at: String,
}
