//! In-memory cache for reconciled conversations.
//!
//! Reconciliation can fire many times per minute while a response is
//! streaming; this cache fronts the persistent store so most cycles skip
//! the store read. It is a single-process, best-effort accelerator and
//! never the system of record: losing it only costs extra store reads.

use recap_core::conversation::Conversation;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Tuning knobs for [`ConversationCache`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries before the oldest-inserted one is evicted.
    pub max_entries: usize,
    /// How long an entry stays readable after insertion.
    pub ttl: Duration,
    /// Period of the background expired-entry sweep.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            ttl: Duration::from_secs(5 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
        }
    }
}

/// Observability counters exposed by [`ConversationCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, expired or not.
    pub total: usize,
    /// Entries past their TTL but not yet swept.
    pub expired: usize,
    /// Entries that a `get` would still return.
    pub valid: usize,
}

struct CacheEntry {
    conversation: Conversation,
    cached_at: Instant,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order. Re-inserting an existing key keeps its slot,
    /// so eviction is insertion-order, not LRU.
    order: VecDeque<String>,
}

impl CacheInner {
    fn sweep_expired(&mut self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.cached_at) <= ttl);
        self.order.retain(|key| self.entries.contains_key(key));
        before - self.entries.len()
    }
}

/// Bounded, time-expiring map from conversation id to its last reconciled
/// state.
pub struct ConversationCache {
    inner: RwLock<CacheInner>,
    config: CacheConfig,
}

impl ConversationCache {
    /// Creates a cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            config,
        }
    }

    /// Creates a cache with the default configuration (100 entries, 5 minute
    /// TTL, 5 minute sweep).
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Returns the cached conversation if present and not past its TTL.
    ///
    /// An expired entry behaves as absent but is not evicted here; eviction
    /// happens on insert sweeps and in the background sweeper.
    pub async fn get(&self, conversation_id: &str) -> Option<Conversation> {
        let inner = self.inner.read().await;
        let entry = inner.entries.get(conversation_id)?;
        if Instant::now().duration_since(entry.cached_at) <= self.config.ttl {
            Some(entry.conversation.clone())
        } else {
            None
        }
    }

    /// Inserts a conversation keyed by its id.
    ///
    /// Performs a full expired-entry sweep first, then evicts the
    /// earliest-inserted entry if the cache is at capacity and the key is
    /// new. Re-inserting an existing key refreshes its timestamp but keeps
    /// its insertion slot.
    pub async fn insert(&self, conversation: Conversation) {
        let key = conversation.id.clone();
        let mut inner = self.inner.write().await;

        inner.sweep_expired(self.config.ttl);

        let is_new = !inner.entries.contains_key(&key);
        if is_new && inner.entries.len() >= self.config.max_entries {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                tracing::debug!("[ConversationCache] evicted oldest entry: {}", oldest);
            }
        }

        inner.entries.insert(
            key.clone(),
            CacheEntry {
                conversation,
                cached_at: Instant::now(),
            },
        );
        if is_new {
            inner.order.push_back(key);
        }
    }

    /// Removes a single entry.
    pub async fn remove(&self, conversation_id: &str) {
        let mut inner = self.inner.write().await;
        inner.entries.remove(conversation_id);
        inner.order.retain(|key| key != conversation_id);
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.order.clear();
    }

    /// Removes expired entries and returns how many were dropped.
    pub async fn sweep(&self) -> usize {
        let mut inner = self.inner.write().await;
        inner.sweep_expired(self.config.ttl)
    }

    /// Returns total/expired/valid entry counts.
    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.read().await;
        let now = Instant::now();
        let total = inner.entries.len();
        let expired = inner
            .entries
            .values()
            .filter(|entry| now.duration_since(entry.cached_at) > self.config.ttl)
            .count();
        CacheStats {
            total,
            expired,
            valid: total - expired,
        }
    }

    /// Spawns the periodic background sweep, bounding memory from entries
    /// that are never touched again.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cache.config.sweep_interval);
            // The first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = cache.sweep().await;
                if removed > 0 {
                    tracing::debug!(
                        "[ConversationCache] sweeper removed {} expired entries",
                        removed
                    );
                }
            }
        })
    }
}
