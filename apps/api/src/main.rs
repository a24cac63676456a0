mod config;
mod cv;
mod document;
mod errors;
mod llm_client;
mod models;
mod nlp;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::cv::cancel::{cancel_pair, CancelHandle};
use crate::cv::pipeline::CvPipeline;
use crate::document::DocumentTextExtractor;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.generator.clone())?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.generator.timeout.as_secs()
    );

    let pipeline = CvPipeline::new(Arc::new(llm), &config.generator);
    let (shutdown_handle, shutdown) = cancel_pair();

    // Build app state
    let state = AppState {
        pipeline: Arc::new(pipeline),
        extractor: Arc::new(DocumentTextExtractor),
        config: config.clone(),
        shutdown,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_handle))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C after cancelling every in-flight pipeline run.
async fn shutdown_signal(handle: CancelHandle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, cancelling in-flight runs");
    handle.cancel();
}
