use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built-in catalogs plus the configured keyphrase backend. Default backend: RakeExtractor.
    pub analyzer: Analyzer,
}
