use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatCompleter;
use crate::retry::RetryPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only for the process lifetime; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured. Analysis requests then fail with a
    /// configuration error instead of the process refusing to start.
    pub llm: Option<Arc<dyn ChatCompleter>>,
    pub config: Config,
    pub retry_policy: RetryPolicy,
}
