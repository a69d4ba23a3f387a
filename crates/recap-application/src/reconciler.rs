//! Reconciliation coordinator.
//!
//! `Reconciler` is the entry point invoked once per debounced DOM-mutation
//! batch per open conversation tab. It loads prior state (cache first,
//! store on miss), aligns the fresh scrape against stored history with the
//! head-anchor matcher, decides between protect-and-merge, full overwrite,
//! or no-op, and persists the result. Cycles for the same conversation are
//! serialized by a per-key lock so a slow store write can never race a
//! newer scrape into a lost update.

use crate::cache::{CacheStats, ConversationCache};
use recap_core::conversation::{
    Conversation, ConversationRepository, Message, ObservedMessage,
};
use recap_core::error::{RecapError, Result};
use recap_core::normalize;
use recap_core::reconcile::{compute_changes, find_head_anchor};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

/// Result of one reconciliation cycle.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The conversation after this cycle (possibly unchanged).
    pub conversation: Conversation,
    /// `Some(true)` when an anchor-protected merge ran, `Some(false)` when
    /// the scrape overwrote stored history, `None` on the new-conversation
    /// and skip paths.
    pub anchor_used: Option<bool>,
    /// Whether this cycle wrote to the persistent store.
    pub persisted: bool,
}

/// Coordinates reconciliation cycles against one repository and one cache.
///
/// Both collaborators are injected at construction; the reconciler holds no
/// global state and is cheap to share behind an `Arc`.
pub struct Reconciler {
    repository: Arc<dyn ConversationRepository>,
    cache: Arc<ConversationCache>,
    /// Per-conversation in-flight guards. Entries are never pruned; the map
    /// is bounded by the number of distinct conversations seen by this
    /// process.
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Reconciler {
    /// Creates a new `Reconciler` with its storage and cache backends.
    pub fn new(repository: Arc<dyn ConversationRepository>, cache: Arc<ConversationCache>) -> Self {
        Self {
            repository,
            cache,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Runs one reconciliation cycle for a conversation.
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - Stable conversation identity (adapter-derived)
    /// * `observed` - Ordered messages rendered by the page right now
    /// * `platform` - Platform tag, used when the conversation is new
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank conversation id, `StoreRead` /
    /// `StoreWrite` when the persistent store rejects an operation. The
    /// cache is never updated on a failed write, so cache and store cannot
    /// diverge.
    pub async fn reconcile(
        &self,
        conversation_id: &str,
        observed: Vec<ObservedMessage>,
        platform: &str,
    ) -> Result<ReconcileOutcome> {
        if conversation_id.trim().is_empty() {
            return Err(RecapError::invalid_input(
                "conversation id must not be blank",
            ));
        }

        let lock = self.key_lock(conversation_id);
        let _guard = lock.lock().await;

        let prior = self.load_prior(conversation_id).await?;

        match prior {
            None => self.reconcile_new(conversation_id, observed, platform).await,
            Some(stored) if observed.is_empty() => {
                // An empty scrape against known history is a transient
                // rendering gap, never "delete everything".
                tracing::debug!(
                    "[Reconciler] empty scrape for known conversation {}, skipping",
                    conversation_id
                );
                Ok(ReconcileOutcome {
                    conversation: stored,
                    anchor_used: None,
                    persisted: false,
                })
            }
            Some(stored) => self.reconcile_existing(stored, observed).await,
        }
    }

    /// Drops a conversation from the cache, or everything when `None`.
    ///
    /// Called on external deletion and for operational cache resets; the
    /// persistent store is not touched.
    pub async fn clear_cache(&self, conversation_id: Option<&str>) {
        match conversation_id {
            Some(id) => self.cache.remove(id).await,
            None => self.cache.clear().await,
        }
    }

    /// Exposes cache counters for operational visibility.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    fn key_lock(&self, conversation_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("lock map poisoned");
        locks
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load_prior(&self, conversation_id: &str) -> Result<Option<Conversation>> {
        if let Some(hit) = self.cache.get(conversation_id).await {
            return Ok(Some(hit));
        }
        let loaded = self
            .repository
            .find_by_id(conversation_id)
            .await
            .map_err(|e| RecapError::store_read(e.to_string()))?;
        if let Some(conversation) = &loaded {
            self.cache.insert(conversation.clone()).await;
        }
        Ok(loaded)
    }

    async fn reconcile_new(
        &self,
        conversation_id: &str,
        observed: Vec<ObservedMessage>,
        platform: &str,
    ) -> Result<ReconcileOutcome> {
        let mut conversation = Conversation::new(conversation_id, platform);

        if observed.is_empty() {
            // Transient first scan: return the shell but persist nothing,
            // so empty placeholders never reach the store.
            return Ok(ReconcileOutcome {
                conversation,
                anchor_used: None,
                persisted: false,
            });
        }

        conversation.messages = normalize_sequence(observed, 0);
        conversation.refresh_title();
        conversation.touch();

        tracing::info!(
            "[Reconciler] new conversation {} with {} messages",
            conversation.id,
            conversation.messages.len()
        );
        self.persist_and_cache(&conversation).await?;

        Ok(ReconcileOutcome {
            conversation,
            anchor_used: None,
            persisted: true,
        })
    }

    async fn reconcile_existing(
        &self,
        stored: Conversation,
        observed: Vec<ObservedMessage>,
    ) -> Result<ReconcileOutcome> {
        match find_head_anchor(&observed, &stored.messages) {
            Some(anchor) => {
                tracing::debug!(
                    "[Reconciler] anchor for {}: position={}, size={}, protected={}",
                    stored.id,
                    anchor.position,
                    anchor.size,
                    anchor.protected_count
                );

                // Correct positions to the full timeline before
                // normalization so derived ids line up with where the
                // messages now belong.
                let corrected = normalize_sequence(observed, anchor.position);
                let protected = &stored.messages[..anchor.position];
                let zone = &stored.messages[anchor.position..];

                let changes = compute_changes(&corrected, zone);
                if changes.is_empty() {
                    return Ok(ReconcileOutcome {
                        conversation: stored,
                        anchor_used: Some(true),
                        persisted: false,
                    });
                }

                tracing::debug!(
                    "[Reconciler] {}: {} added, {} modified, {} deleted",
                    stored.id,
                    changes.added.len(),
                    changes.modified.len(),
                    changes.deleted.len()
                );

                let mut merged: Vec<Message> = protected.to_vec();
                merged.extend(changes.merged);
                merged.sort_by_key(|m| m.position);
                for (index, message) in merged.iter_mut().enumerate() {
                    message.position = index;
                }

                let mut conversation = stored;
                conversation.messages = merged;
                conversation.refresh_title();
                conversation.touch();

                self.persist_and_cache(&conversation).await?;
                Ok(ReconcileOutcome {
                    conversation,
                    anchor_used: Some(true),
                    persisted: true,
                })
            }
            None => {
                // Without an anchor there is no reliable mapping between
                // observed and stored messages; the scrape is authoritative.
                tracing::warn!(
                    "[Reconciler] no anchor for {}, replacing {} stored messages with {} observed",
                    stored.id,
                    stored.messages.len(),
                    observed.len()
                );

                let mut conversation = stored;
                conversation.messages = normalize_sequence(observed, 0);
                conversation.refresh_title();
                conversation.touch();

                self.persist_and_cache(&conversation).await?;
                Ok(ReconcileOutcome {
                    conversation,
                    anchor_used: Some(false),
                    persisted: true,
                })
            }
        }
    }

    async fn persist_and_cache(&self, conversation: &Conversation) -> Result<()> {
        self.repository
            .save(conversation)
            .await
            .map_err(|e| RecapError::store_write(e.to_string()))?;
        // Cache only after the write landed, so cache and store never
        // diverge on a failed write.
        self.cache.insert(conversation.clone()).await;
        Ok(())
    }
}

/// Renumbers an observed sequence to start at `base` and normalizes it.
fn normalize_sequence(observed: Vec<ObservedMessage>, base: usize) -> Vec<Message> {
    observed
        .into_iter()
        .enumerate()
        .map(|(index, mut message)| {
            message.position = base + index;
            normalize::from_observed(message)
        })
        .collect()
}

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod tests;
