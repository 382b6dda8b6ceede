mod analysis;
mod config;
mod envelope;
mod errors;
mod llm_client;
mod retry;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{ChatCompleter, LlmClient};
use crate::retry::RetryPolicy;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, not on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Option<Arc<dyn ChatCompleter>> = match config.llm_api_key.clone() {
        Some(api_key) => {
            let client = LlmClient::new(api_key, &config)?;
            info!("LLM client initialized (model: {})", client.model());
            let client: Arc<dyn ChatCompleter> = Arc::new(client);
            Some(client)
        }
        None => {
            warn!("OPENAI_API_KEY is not set; analysis requests will fail with a configuration error");
            None
        }
    };

    let retry_policy = RetryPolicy::from_config(&config);
    info!(
        "Retry policy: {} attempts, {}ms base delay, {:?} mode; request timeout {}s",
        retry_policy.max_attempts,
        retry_policy.base_delay.as_millis(),
        retry_policy.mode,
        config.request_timeout.as_secs()
    );

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        retry_policy,
    };

    // Build router
    let app = build_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C so in-flight requests can finish.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
