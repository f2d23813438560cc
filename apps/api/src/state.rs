use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::InferenceService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; scripted in tests.
    pub llm: Arc<dyn InferenceService>,
    pub config: Config,
}
