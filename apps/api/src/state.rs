use std::sync::Arc;

use crate::config::Config;
use crate::engine::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Parsers, scorer and ranker built once at startup around one vocabulary.
    pub engine: Arc<MatchEngine>,
}
