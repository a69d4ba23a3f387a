//! Raw message observations produced by scraping adapters.

use super::message::Sender;

/// One message as observed in the currently rendered page.
///
/// This is the shape scraping adapters hand to the reconciliation pipeline:
/// everything except `sender`, `content` and `position` is optional, and the
/// normalizer fills the gaps before any comparison runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedMessage {
    /// Adapter-supplied stable id, if the platform exposes one.
    pub id: Option<String>,
    /// The role of the message sender.
    pub sender: Sender,
    /// Primary text as rendered.
    pub content: String,
    /// Auxiliary reasoning text, if rendered.
    pub thinking: Option<String>,
    /// 0-based rendering order within this scrape.
    pub position: usize,
}

impl ObservedMessage {
    /// Creates an observation with the fields every adapter can supply.
    pub fn new(sender: Sender, content: impl Into<String>, position: usize) -> Self {
        Self {
            id: None,
            sender,
            content: content.into(),
            thinking: None,
            position,
        }
    }

    /// Attaches an adapter-supplied stable id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attaches auxiliary reasoning text.
    pub fn with_thinking(mut self, thinking: impl Into<String>) -> Self {
        self.thinking = Some(thinking.into());
        self
    }
}
