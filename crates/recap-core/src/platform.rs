//! Platform adapter capability trait and dispatch registry.
//!
//! Each supported chat site provides one stateless [`PlatformAdapter`]
//! implementation; the registry selects the right one by platform tag or by
//! page URL at runtime. The core never touches DOM markup — adapters receive
//! already-extracted observation rows as JSON from the scraping layer.

use crate::conversation::ObservedMessage;
use std::sync::Arc;

/// Capabilities a per-site scraping adapter exposes to the core.
pub trait PlatformAdapter: Send + Sync {
    /// The platform tag this adapter handles, e.g. "chatgpt".
    fn platform(&self) -> &str;

    /// Whether the given page URL belongs to this platform.
    fn validate_url(&self, url: &str) -> bool;

    /// Derives the stable conversation id from a page URL.
    ///
    /// Returns `None` when the URL does not name a conversation (e.g. a
    /// landing page).
    fn extract_conversation_id(&self, url: &str) -> Option<String>;

    /// Maps raw capture payload rows into ordered message observations.
    fn extract_messages(&self, raw: &serde_json::Value) -> Vec<ObservedMessage>;
}

/// Runtime dispatch table mapping platform tags and URLs to adapters.
///
/// Registration order matters for [`AdapterRegistry::resolve_url`]: the
/// first adapter accepting the URL wins, so a catch-all adapter should be
/// registered last.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn PlatformAdapter>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter. With duplicate platform tags the earliest
    /// registration wins both tag lookup and URL dispatch.
    pub fn register(&mut self, adapter: Arc<dyn PlatformAdapter>) {
        self.adapters.push(adapter);
    }

    /// Resolves an adapter by its platform tag.
    pub fn resolve(&self, platform: &str) -> Option<Arc<dyn PlatformAdapter>> {
        self.adapters
            .iter()
            .find(|a| a.platform() == platform)
            .cloned()
    }

    /// Resolves the first adapter whose `validate_url` accepts the URL.
    pub fn resolve_url(&self, url: &str) -> Option<Arc<dyn PlatformAdapter>> {
        self.adapters.iter().find(|a| a.validate_url(url)).cloned()
    }

    /// Lists the registered platform tags in registration order.
    pub fn platforms(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.platform()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Sender;

    struct StubAdapter {
        tag: &'static str,
        host: &'static str,
    }

    impl PlatformAdapter for StubAdapter {
        fn platform(&self) -> &str {
            self.tag
        }

        fn validate_url(&self, url: &str) -> bool {
            url.contains(self.host)
        }

        fn extract_conversation_id(&self, url: &str) -> Option<String> {
            self.validate_url(url).then(|| format!("{}-x", self.tag))
        }

        fn extract_messages(&self, _raw: &serde_json::Value) -> Vec<ObservedMessage> {
            vec![ObservedMessage::new(Sender::User, "hi", 0)]
        }
    }

    #[test]
    fn test_resolve_by_tag() {
        let mut registry = AdapterRegistry::new();
        registry.register(Arc::new(StubAdapter {
            tag: "alpha",
            host: "alpha.example",
        }));
        registry.register(Arc::new(StubAdapter {
            tag: "beta",
            host: "beta.example",
        }));

        assert_eq!(registry.resolve("beta").unwrap().platform(), "beta");
        assert!(registry.resolve("gamma").is_none());
    }

    #[test]
    fn test_resolve_url_picks_first_accepting_adapter() {
        let mut registry = AdapterRegistry::new();
        registry.register(Arc::new(StubAdapter {
            tag: "alpha",
            host: "example",
        }));
        registry.register(Arc::new(StubAdapter {
            tag: "beta",
            host: "beta.example",
        }));

        // Both accept, registration order decides.
        let adapter = registry.resolve_url("https://beta.example/c/1").unwrap();
        assert_eq!(adapter.platform(), "alpha");
    }

    #[test]
    fn test_platforms_listing() {
        let mut registry = AdapterRegistry::new();
        registry.register(Arc::new(StubAdapter {
            tag: "alpha",
            host: "a",
        }));
        assert_eq!(registry.platforms(), vec!["alpha"]);
    }
}
