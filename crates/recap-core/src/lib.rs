//! Domain layer for RECAP.
//!
//! This crate holds the conversation data model, the normalizer, the pure
//! reconciliation computations (head-anchor matching and change-set
//! diffing), the repository trait for the persistent store, and the
//! platform-adapter capability trait. Everything here is I/O-free except
//! for clock reads; the application layer (`recap-application`) owns
//! orchestration and the infrastructure layer (`recap-infrastructure`) owns
//! concrete storage and adapters.

pub mod conversation;
pub mod error;
pub mod normalize;
pub mod platform;
pub mod reconcile;

// Re-export common error type
pub use error::{RecapError, Result};
