//! TXSHIELD Fraud Decision HTTP Server
//!
//! Provides the REST API for evaluating transactions.

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txshield_server::{
    api,
    config::{LogFormat, ServerConfig},
    engine,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (the log level lives there)
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config.log_level, config.log_format)?;
    info!("Loaded configuration: {:?}", config);

    // Initialize decision engine
    let engine = engine::init_engine(&config).await?;
    info!("Decision engine initialized");

    let app = api::create_router(Arc::new(engine));

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Evaluate API: http://{}/evaluate", addr);
    info!("  Scorer endpoint: {}", config.scorer.endpoint);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(log_level: &str, log_format: LogFormat) -> Result<()> {
    let json = log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "txshield_server={level},txshield_sdk={level},txshield_runtime={level},tower_http=debug",
                    level = log_level
                )
                .into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
