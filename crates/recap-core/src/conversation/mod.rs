//! Conversation domain module.
//!
//! This module contains all conversation-related domain models, the raw
//! observation shape produced by scraping adapters, and the repository
//! interface for the persistent store.
//!
//! # Module Structure
//!
//! - `model`: Core conversation domain model (`Conversation`)
//! - `message`: Message types (`Sender`, `Message`)
//! - `observed`: Adapter output shape (`ObservedMessage`)
//! - `repository`: Repository trait for conversation persistence

mod message;
mod model;
mod observed;
mod repository;

// Re-export public API
pub use message::{Message, Sender};
pub use model::{Conversation, DEFAULT_TITLE};
pub use observed::ObservedMessage;
pub use repository::ConversationRepository;
