//! Infrastructure layer for RECAP.
//!
//! Concrete implementations behind the domain layer's seams: the JSON-file
//! conversation store and the per-platform scraping adapters with their
//! dispatch registry.

mod json_conversation_repository;
pub mod platforms;

pub use json_conversation_repository::JsonConversationRepository;
pub use platforms::{ChatGptAdapter, ClaudeAdapter, GenericAdapter, default_registry};
