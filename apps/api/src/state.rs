use std::sync::Arc;

use crate::config::Config;
use crate::scoring::TextScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable after startup; holds the stop-word and lemma tables.
    pub scorer: Arc<dyn TextScorer>,
}
