//! Application state wiring the relay together.
//!
//! AppState pins the generic [`RelayService`] to the concrete infra
//! implementations: the DashMap session store and the OpenAI-compatible
//! provider. Configuration is read from the environment exactly once here.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::warn;

use parley_core::relay::RelayService;
use parley_infra::llm::OpenAiCompatProvider;
use parley_infra::llm::openai_compat::config::openai_defaults;
use parley_infra::store::MemorySessionStore;

/// Concrete relay type pinned to the infra implementations.
pub type ConcreteRelay = RelayService<MemorySessionStore, OpenAiCompatProvider>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelay>,
}

impl AppState {
    /// Initialize the application state.
    ///
    /// `OPENAI_API_KEY` supplies the upstream credential; when it is absent
    /// the server still starts, reports `openai_configured: false` from
    /// /health, and rejects chat requests. `OPENAI_BASE_URL` optionally
    /// points the provider at a different OpenAI-compatible endpoint.
    pub fn init(default_model: &str) -> Self {
        let provider = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                let mut config = openai_defaults(SecretString::from(key), default_model);
                if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
                    config = config.with_base_url(base_url);
                }
                Some(Arc::new(OpenAiCompatProvider::new(config)))
            }
            _ => {
                warn!("OPENAI_API_KEY is not set; chat requests will fail until it is");
                None
            }
        };

        let store = Arc::new(MemorySessionStore::new());
        let relay = RelayService::new(store, provider, default_model);

        Self {
            relay: Arc::new(relay),
        }
    }
}
