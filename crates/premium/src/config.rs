//! Service configuration

use anyhow::Result;
use premium_lib::DEFAULT_ARTIFACT_DIR;
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumConfig {
    /// Name attached to structured log events
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Directory where model artifacts are persisted
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
}

fn default_service_name() -> String {
    "premium-hybrid".to_string()
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_DIR)
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            artifact_dir: default_artifact_dir(),
        }
    }
}

impl PremiumConfig {
    /// Load configuration from an optional `premium` file and `PREMIUM_*` env vars
    pub fn load() -> Result<Self> {
        Self::load_from("premium")
    }

    fn load_from(file_stem: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(config::Environment::with_prefix("PREMIUM"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid configuration, using defaults");
            PremiumConfig::default()
        }))
    }
}
