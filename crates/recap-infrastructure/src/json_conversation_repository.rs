//! JSON-file ConversationRepository implementation.

use recap_core::conversation::{Conversation, ConversationRepository};
use recap_core::error::{RecapError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A repository implementation storing each conversation as one JSON file.
///
/// Layout:
/// ```text
/// base_dir/
/// └── conversations/
///     ├── chatgpt-abc.json
///     └── claude-def.json
/// ```
///
/// Saves go through a temp file plus rename, so a conversation document is
/// always either the previous version or the new one, never a partial write.
pub struct JsonConversationRepository {
    base_dir: PathBuf,
}

impl JsonConversationRepository {
    /// Creates a new repository rooted at `base_dir`, creating the directory
    /// structure if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(base_dir.join("conversations"))?;
        Ok(Self { base_dir })
    }

    /// Creates a repository at the default location (`~/.recap`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// directory structure cannot be created.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| RecapError::internal("failed to get home directory"))?;
        Self::new(home_dir.join(".recap"))
    }

    fn conversations_dir(&self) -> PathBuf {
        self.base_dir.join("conversations")
    }

    fn conversation_file_path(&self, conversation_id: &str) -> PathBuf {
        self.conversations_dir()
            .join(format!("{}.json", conversation_id))
    }

    fn load_conversation_from_path(&self, path: &Path) -> Result<Conversation> {
        let content = fs::read_to_string(path)?;
        let conversation: Conversation = serde_json::from_str(&content)?;
        Ok(conversation)
    }

    /// Scans the conversations directory, skipping files that fail to parse.
    fn scan_all(&self) -> Result<Vec<Conversation>> {
        let mut conversations = Vec::new();
        for entry in fs::read_dir(self.conversations_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                match self.load_conversation_from_path(&path) {
                    Ok(conversation) => conversations.push(conversation),
                    Err(e) => {
                        tracing::warn!(
                            "[JsonConversationRepository] skipping unreadable file {:?}: {}",
                            path,
                            e
                        );
                    }
                }
            }
        }
        Ok(conversations)
    }
}

#[async_trait::async_trait]
impl ConversationRepository for JsonConversationRepository {
    async fn find_by_id(&self, conversation_id: &str) -> Result<Option<Conversation>> {
        let file_path = self.conversation_file_path(conversation_id);
        if !file_path.exists() {
            return Ok(None);
        }
        self.load_conversation_from_path(&file_path).map(Some)
    }

    async fn save(&self, conversation: &Conversation) -> Result<()> {
        let file_path = self.conversation_file_path(&conversation.id);
        let json = serde_json::to_string_pretty(conversation)?;

        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &file_path)?;

        tracing::debug!(
            "[JsonConversationRepository] saved conversation {} ({} messages)",
            conversation.id,
            conversation.messages.len()
        );
        Ok(())
    }

    async fn delete(&self, conversation_id: &str) -> Result<()> {
        let file_path = self.conversation_file_path(conversation_id);
        if file_path.exists() {
            fs::remove_file(&file_path)?;
        }
        Ok(())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Conversation>> {
        let conversations = self.scan_all()?;
        Ok(conversations.into_iter().find(|c| c.url == url))
    }

    async fn list_all(&self) -> Result<Vec<Conversation>> {
        let mut conversations = self.scan_all()?;
        // Most recently updated first
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }
}
