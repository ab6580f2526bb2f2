//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use txshield_sdk::{EngineConfig, ScorerConfig, ScorerFailurePolicy};

/// Environment variable that overrides `scorer.endpoint`
pub const FRAUD_API_URL_VAR: &str = "FRAUD_API_URL";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Scorer endpoint, deadline and concurrency cap
    pub scorer: ScorerConfig,

    /// Behaviour when the scorer fails after the rules allowed a transaction
    pub failure_policy: ScorerFailurePolicy,

    /// YAML rule files, evaluated after the built-in rules in list order
    pub rules_files: Vec<PathBuf>,

    /// Keep the built-in rules
    pub include_builtin_rules: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            scorer: ScorerConfig::default(),
            failure_policy: ScorerFailurePolicy::default(),
            rules_files: Vec::new(),
            include_builtin_rules: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config = Self::load_from("config/server")?;
        Ok(config.with_fraud_api_url(std::env::var(FRAUD_API_URL_VAR).ok()))
    }

    /// Load from `file` (any format the `config` crate knows, extension optional)
    /// layered under `TXSHIELD_*` environment variables
    pub fn load_from(file: &str) -> anyhow::Result<Self> {
        let config_result = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("TXSHIELD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("rules_files"),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => Err(anyhow::anyhow!("Failed to read config: {}", e)),
        }
    }

    /// Apply the legacy scorer URL override
    pub fn with_fraud_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.scorer.endpoint = url;
        }
        self
    }

    /// Convert into the SDK engine configuration
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            scorer: self.scorer.clone(),
            failure_policy: self.failure_policy,
            include_builtin_rules: self.include_builtin_rules,
            rule_files: self.rules_files.clone(),
        }
    }
}
