//! Pure reconciliation computations.
//!
//! Both components here are synchronous, non-suspending functions over
//! in-memory data; they never perform I/O, which keeps the reconciliation
//! logic testable without a real store.
//!
//! - `anchor`: aligns a fresh (possibly lazy-load-truncated) scrape against
//!   stored history
//! - `changeset`: per-message diff over the aligned operation zone

mod anchor;
mod changeset;

pub use anchor::{AnchorMatch, MAX_ANCHOR_SIZE, find_head_anchor, fingerprint};
pub use changeset::{ChangeSet, compute_changes};
