//! Conversation repository trait.
//!
//! Defines the interface for conversation persistence operations.

use super::model::Conversation;
use crate::error::Result;

/// An abstract repository for managing conversation persistence.
///
/// This trait defines the contract for persisting and retrieving captured
/// conversations, decoupling the reconciliation logic from the specific
/// storage mechanism (e.g., JSON files, database, remote API).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Atomic whole-conversation writes (reconciliation assumes a save either
///   fully lands or fully fails)
/// - Concurrent access if needed
#[async_trait::async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Finds a conversation by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Conversation))`: Conversation found
    /// - `Ok(None)`: Conversation not found
    /// - `Err(RecapError)`: Error occurred during retrieval
    async fn find_by_id(&self, conversation_id: &str) -> Result<Option<Conversation>>;

    /// Saves a conversation to storage, replacing any previous version.
    async fn save(&self, conversation: &Conversation) -> Result<()>;

    /// Deletes a conversation from storage.
    ///
    /// Deleting a conversation that does not exist is not an error.
    async fn delete(&self, conversation_id: &str) -> Result<()>;

    /// Finds a conversation by the page URL it was captured from.
    ///
    /// Exposed for scraping adapters; reconciliation itself only uses ids.
    async fn find_by_url(&self, url: &str) -> Result<Option<Conversation>>;

    /// Lists all stored conversations.
    async fn list_all(&self) -> Result<Vec<Conversation>>;
}
