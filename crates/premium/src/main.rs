//! Premium Hybrid - startup entry point
//!
//! Prepares the process environment used by model training and serving
//! jobs: structured logging, configuration, and the artifact directory.

use anyhow::Result;
use premium_lib::{ArtifactStore, PredictionMetrics, StructuredLogger};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    let config = config::PremiumConfig::load()?;
    info!(artifact_dir = %config.artifact_dir.display(), "Service configured");

    let logger = StructuredLogger::new(&config.service_name);
    logger.log_startup(SERVICE_VERSION);

    // Register prediction collectors before any job runs
    PredictionMetrics::new();

    let store = ArtifactStore::open(&config.artifact_dir)?;
    logger.log_artifact_dir(store.root(), store.created());

    Ok(())
}
