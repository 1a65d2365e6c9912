use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::builder::session::SessionStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable analysis backend. Default: LlmResumeAnalyzer.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub config: Config,
}
