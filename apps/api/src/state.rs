use std::sync::Arc;

use crate::config::Config;
use crate::rag::answer::Generator;
use crate::rag::embed::Embedder;
use crate::rag::index::SharedIndex;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Embedding capability. Wired to the OpenAI client at startup; tests
    /// substitute deterministic fakes.
    pub embedder: Arc<dyn Embedder>,
    /// Generation capability, same deal.
    pub generator: Arc<dyn Generator>,
    /// The currently indexed resume. Empty until the first upload succeeds.
    pub index: SharedIndex,
}
