//! Per-message diff between the current scrape and the stored operation
//! zone.
//!
//! `compute_changes` is a pure function over its two inputs: the caller (the
//! reconciliation coordinator) decides what to do with the result, including
//! guarding against an empty scrape wiping a conversation.

use crate::conversation::Message;
use std::collections::HashMap;

/// The outcome of diffing a current sequence against a stored zone.
///
/// Ephemeral: produced for one reconciliation call and discarded after the
/// coordinator consumes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Messages present in current but not in the stored zone.
    pub added: Vec<Message>,
    /// Messages whose content or thinking text changed.
    pub modified: Vec<Message>,
    /// Ids present in the stored zone but absent from current.
    pub deleted: Vec<String>,
    /// The resulting full sequence for the zone: stored order minus deleted,
    /// modified swapped in-place, added appended. Not necessarily final
    /// conversation order — the caller re-sorts by position after
    /// concatenating with any protected zone.
    pub merged: Vec<Message>,
}

impl ChangeSet {
    /// Whether the diff found no additions, modifications or deletions.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }
}

/// Computes added / modified / deleted / merged sets keyed by message id.
///
/// Modification means exact string inequality of `content` or `thinking`;
/// no fuzzy diffing. A modified message keeps the stored `created_at` so an
/// edit does not rewrite capture history.
pub fn compute_changes(current: &[Message], stored_zone: &[Message]) -> ChangeSet {
    let current_by_id: HashMap<&str, &Message> =
        current.iter().map(|m| (m.id.as_str(), m)).collect();
    let stored_by_id: HashMap<&str, &Message> =
        stored_zone.iter().map(|m| (m.id.as_str(), m)).collect();

    let added: Vec<Message> = current
        .iter()
        .filter(|m| !stored_by_id.contains_key(m.id.as_str()))
        .cloned()
        .collect();

    let deleted: Vec<String> = stored_zone
        .iter()
        .filter(|m| !current_by_id.contains_key(m.id.as_str()))
        .map(|m| m.id.clone())
        .collect();

    let modified: Vec<Message> = current
        .iter()
        .filter_map(|m| {
            let stored = stored_by_id.get(m.id.as_str())?;
            if m.content != stored.content || m.thinking != stored.thinking {
                let mut updated = m.clone();
                updated.created_at = stored.created_at.clone();
                Some(updated)
            } else {
                None
            }
        })
        .collect();

    let modified_by_id: HashMap<&str, &Message> =
        modified.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut merged: Vec<Message> = stored_zone
        .iter()
        .filter(|m| current_by_id.contains_key(m.id.as_str()))
        .map(|m| match modified_by_id.get(m.id.as_str()) {
            Some(replacement) => (*replacement).clone(),
            None => m.clone(),
        })
        .collect();
    merged.extend(added.iter().cloned());

    ChangeSet {
        added,
        modified,
        deleted,
        merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Sender;

    fn message(id: &str, content: &str, position: usize) -> Message {
        Message {
            id: id.to_string(),
            sender: Sender::User,
            content: content.to_string(),
            thinking: None,
            position,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_identical_sequences_produce_empty_changeset() {
        let stored = vec![message("a", "one", 0), message("b", "two", 1)];
        let changes = compute_changes(&stored, &stored);
        assert!(changes.is_empty());
        assert_eq!(changes.merged, stored);
    }

    #[test]
    fn test_added_messages_are_appended_to_merged() {
        let stored = vec![message("a", "one", 0)];
        let current = vec![message("a", "one", 0), message("b", "two", 1)];

        let changes = compute_changes(&current, &stored);
        assert_eq!(changes.added.len(), 1);
        assert_eq!(changes.added[0].id, "b");
        assert!(changes.deleted.is_empty());
        assert_eq!(changes.merged.len(), 2);
        assert_eq!(changes.merged[1].id, "b");
    }

    #[test]
    fn test_deleted_messages_are_dropped_from_merged() {
        let stored = vec![message("a", "one", 0), message("b", "two", 1)];
        let current = vec![message("a", "one", 0)];

        let changes = compute_changes(&current, &stored);
        assert_eq!(changes.deleted, vec!["b".to_string()]);
        assert_eq!(changes.merged.len(), 1);
        assert_eq!(changes.merged[0].id, "a");
    }

    #[test]
    fn test_modified_content_is_swapped_in_place() {
        let stored = vec![message("a", "draft", 0), message("b", "two", 1)];
        let mut edited = message("a", "final", 0);
        edited.created_at = "2024-06-01T00:00:00Z".to_string();
        let current = vec![edited, message("b", "two", 1)];

        let changes = compute_changes(&current, &stored);
        assert_eq!(changes.modified.len(), 1);
        assert_eq!(changes.merged[0].content, "final");
        // edit keeps the original capture timestamp
        assert_eq!(changes.merged[0].created_at, "2024-01-01T00:00:00Z");
        assert_eq!(changes.merged[1].id, "b");
    }

    #[test]
    fn test_thinking_change_counts_as_modification() {
        let stored = vec![message("a", "same", 0)];
        let mut current_msg = message("a", "same", 0);
        current_msg.thinking = Some("reasoning".to_string());

        let changes = compute_changes(&[current_msg], &stored);
        assert_eq!(changes.modified.len(), 1);
        assert_eq!(
            changes.merged[0].thinking.as_deref(),
            Some("reasoning")
        );
    }

    #[test]
    fn test_empty_current_deletes_entire_zone() {
        let stored = vec![message("a", "one", 0), message("b", "two", 1)];
        let changes = compute_changes(&[], &stored);
        assert_eq!(changes.deleted.len(), 2);
        assert!(changes.merged.is_empty());
        assert!(changes.added.is_empty());
    }

    #[test]
    fn test_empty_both_sides() {
        let changes = compute_changes(&[], &[]);
        assert!(changes.is_empty());
        assert!(changes.merged.is_empty());
    }
}
