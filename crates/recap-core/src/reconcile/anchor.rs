//! Head-anchor detection between a fresh scrape and stored history.
//!
//! Chat UIs frequently virtualize old messages out of the DOM. Naively
//! diffing "what is on screen now" against "what is stored" would delete all
//! of the un-rendered history, so reconciliation first looks for the spot in
//! stored history where the head of the current scrape lines up. Everything
//! stored before that spot is protected from deletion.

use crate::conversation::{Message, ObservedMessage, Sender};
use crate::normalize::CONTENT_PREFIX_CHARS;

/// Maximum number of leading current messages used as the anchor candidate.
pub const MAX_ANCHOR_SIZE: usize = 6;

/// A successful alignment of the current scrape against stored history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMatch {
    /// Index in the stored sequence where the anchor run begins.
    pub position: usize,
    /// Number of consecutive messages that matched.
    pub size: usize,
    /// Number of stored messages before the anchor; these are still-valid
    /// history the current scrape simply did not render.
    pub protected_count: usize,
}

/// Order-sensitive fingerprint: sender tag plus the first 100 content chars.
///
/// Plain strings rather than hashes, to keep exact matching simple and
/// debuggable.
pub fn fingerprint(sender: Sender, content: &str) -> String {
    let prefix: String = content.chars().take(CONTENT_PREFIX_CHARS).collect();
    format!("{}:{}", sender, prefix)
}

fn observed_fingerprint(observed: &ObservedMessage) -> String {
    fingerprint(observed.sender, &observed.content)
}

fn message_fingerprint(message: &Message) -> String {
    fingerprint(message.sender, &message.content)
}

/// Finds the longest prefix of `current` that appears as a contiguous run in
/// `stored`.
///
/// Candidate sizes run from `min(6, current.len())` down to 1; the largest
/// size with any match wins, and among equal-size matches the leftmost
/// stored position wins. Returns `None` when either side is empty or no
/// prefix of any size matches — in that case the caller must treat the
/// scrape as authoritative rather than attempt a destructive partial merge.
pub fn find_head_anchor(current: &[ObservedMessage], stored: &[Message]) -> Option<AnchorMatch> {
    if current.is_empty() || stored.is_empty() {
        return None;
    }

    let max_size = MAX_ANCHOR_SIZE.min(current.len());
    let head_fingerprints: Vec<String> = current
        .iter()
        .take(max_size)
        .map(observed_fingerprint)
        .collect();
    let stored_fingerprints: Vec<String> = stored.iter().map(message_fingerprint).collect();

    for size in (1..=max_size).rev() {
        let head = &head_fingerprints[..size];
        if let Some(position) = stored_fingerprints.windows(size).position(|w| w == head) {
            return Some(AnchorMatch {
                position,
                size,
                protected_count: position,
            });
        }
    }

    None
}
