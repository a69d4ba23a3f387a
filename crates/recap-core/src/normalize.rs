//! Message and conversation normalization.
//!
//! Everything that enters the reconciliation pipeline passes through here
//! first, so downstream comparisons (change-set equality checks, anchor
//! fingerprinting) never operate on missing fields. All functions are pure
//! and deterministic apart from clock reads for default timestamps.

use crate::conversation::{Conversation, Message, ObservedMessage, Sender};

/// Number of leading content characters that feed fingerprints and derived
/// message ids.
pub const CONTENT_PREFIX_CHARS: usize = 100;

/// Deterministic polynomial hash over the characters of `content`.
///
/// No cryptographic property is required here, only determinism and a low
/// collision rate within one conversation's message count.
pub fn content_hash(content: &str) -> u64 {
    let mut hash: u64 = 0;
    for c in content.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as u64);
    }
    hash
}

/// Derives a fallback message id from (sender, position, content prefix).
///
/// Identity is content-sensitive, not purely positional: the same text at
/// the same slot hashes identically across scrapes.
pub fn fallback_message_id(sender: Sender, position: usize, content: &str) -> String {
    let prefix: String = content.chars().take(CONTENT_PREFIX_CHARS).collect();
    format!("{}-{}-{:x}", sender, position, content_hash(&prefix))
}

/// Converts a raw adapter observation into a well-formed [`Message`].
///
/// The observation's `position` must already be the position the message
/// should occupy in the full timeline (anchor-corrected where applicable),
/// since a derived id is computed from it.
pub fn from_observed(observed: ObservedMessage) -> Message {
    let now = chrono::Utc::now().to_rfc3339();
    let id = match observed.id {
        Some(id) if !id.is_empty() => id,
        _ => fallback_message_id(observed.sender, observed.position, &observed.content),
    };
    Message {
        id,
        sender: observed.sender,
        content: observed.content,
        thinking: observed.thinking,
        position: observed.position,
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Fills any blank required fields on a message. Idempotent.
pub fn normalize_message(mut message: Message) -> Message {
    if message.id.is_empty() {
        message.id = fallback_message_id(message.sender, message.position, &message.content);
    }
    if message.created_at.is_empty() {
        message.created_at = chrono::Utc::now().to_rfc3339();
    }
    if message.updated_at.is_empty() {
        message.updated_at = message.created_at.clone();
    }
    message
}

/// Fills any blank required fields on a conversation and recursively
/// normalizes the contained messages. Idempotent.
pub fn normalize_conversation(mut conversation: Conversation) -> Conversation {
    if conversation.title.is_empty() {
        conversation.title = crate::conversation::DEFAULT_TITLE.to_string();
    }
    if conversation.created_at.is_empty() {
        conversation.created_at = chrono::Utc::now().to_rfc3339();
    }
    if conversation.updated_at.is_empty() {
        conversation.updated_at = conversation.created_at.clone();
    }
    conversation.messages = conversation
        .messages
        .into_iter()
        .map(normalize_message)
        .collect();
    conversation
}
