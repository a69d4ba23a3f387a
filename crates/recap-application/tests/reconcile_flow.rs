//! End-to-end reconciliation flow over the real JSON-file store and the
//! platform adapter registry.

use recap_application::{ConversationCache, Reconciler};
use recap_core::conversation::ConversationRepository;
use recap_infrastructure::{JsonConversationRepository, default_registry};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

const PAGE_URL: &str = "https://chatgpt.com/c/abc-123";

fn reconciler_over(dir: &TempDir) -> (Reconciler, Arc<JsonConversationRepository>) {
    let repository = Arc::new(JsonConversationRepository::new(dir.path()).unwrap());
    let reconciler = Reconciler::new(
        repository.clone(),
        Arc::new(ConversationCache::with_defaults()),
    );
    (reconciler, repository)
}

#[tokio::test]
async fn test_capture_merge_and_restart_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let (reconciler, repository) = reconciler_over(&temp_dir);

    // The scraping layer resolves the adapter from the page URL.
    let registry = default_registry();
    let adapter = registry.resolve_url(PAGE_URL).unwrap();
    assert_eq!(adapter.platform(), "chatgpt");
    let conversation_id = adapter.extract_conversation_id(PAGE_URL).unwrap();

    // First scan: full page.
    let raw = json!([
        { "sender": "user", "content": "What is a borrow checker?" },
        { "sender": "ai", "content": "It enforces ownership rules at compile time." },
        { "sender": "user", "content": "Show me an example." },
        { "sender": "ai", "content": "Sure, consider this function..." },
    ]);
    let outcome = reconciler
        .reconcile(
            &conversation_id,
            adapter.extract_messages(&raw),
            adapter.platform(),
        )
        .await
        .unwrap();
    assert!(outcome.persisted);
    assert_eq!(outcome.conversation.messages.len(), 4);
    assert_eq!(outcome.conversation.title, "What is a borrow checker?");

    // Second scan: the page lazy-unloaded the first two turns and a new
    // exchange appeared.
    let raw = json!([
        { "sender": "user", "content": "Show me an example." },
        { "sender": "ai", "content": "Sure, consider this function..." },
        { "sender": "user", "content": "Why does that fail to compile?" },
    ]);
    let outcome = reconciler
        .reconcile(
            &conversation_id,
            adapter.extract_messages(&raw),
            adapter.platform(),
        )
        .await
        .unwrap();
    assert_eq!(outcome.anchor_used, Some(true));
    assert_eq!(outcome.conversation.messages.len(), 5);
    assert_eq!(
        outcome.conversation.messages[0].content,
        "What is a borrow checker?"
    );

    // Restart: fresh cache, same store. The same scrape produces no write.
    let (reconciler, _) = reconciler_over(&temp_dir);
    let outcome = reconciler
        .reconcile(
            &conversation_id,
            adapter.extract_messages(&raw),
            adapter.platform(),
        )
        .await
        .unwrap();
    assert!(!outcome.persisted);
    assert_eq!(outcome.conversation.messages.len(), 5);

    // The store is the system of record throughout.
    let stored = repository
        .find_by_id(&conversation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.messages.len(), 5);
}
