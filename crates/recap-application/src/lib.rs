//! Application layer for RECAP.
//!
//! This crate coordinates the domain layer into full reconciliation cycles:
//! the [`Reconciler`] is the entry point the scraping/router layer calls
//! once per debounced mutation batch, and the [`ConversationCache`] fronts
//! the persistent store so frequent re-scans stay cheap.

mod cache;
mod reconciler;

pub use cache::{CacheConfig, CacheStats, ConversationCache};
pub use reconciler::{ReconcileOutcome, Reconciler};
