//! Decision engine initialization
//!
//! Thin wrapper around the SDK's DecisionEngineBuilder that converts server
//! configuration to SDK configuration.

use crate::config::ServerConfig;
use anyhow::Result;
use txshield_sdk::{DecisionEngine, DecisionEngineBuilder};
use tracing::info;

/// Initialize decision engine
///
/// Fails when a rule file cannot be loaded or the scorer endpoint is invalid.
pub async fn init_engine(config: &ServerConfig) -> Result<DecisionEngine> {
    for path in &config.rules_files {
        info!("Loading rules from: {}", path.display());
    }

    let engine = DecisionEngineBuilder::new()
        .with_config(config.to_engine_config())
        .build()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize decision engine: {}", e))?;

    info!(
        "Engine ready with {} rule(s), scorer at {}",
        engine.rules().len(),
        config.scorer.endpoint
    );

    Ok(engine)
}
