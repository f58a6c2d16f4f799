//! Price Optimizer Server
//!
//! Serves `POST /predict`: validates four product attributes, runs the
//! external scoring model once per request and returns the optimized price.
//!
//! # Usage
//! ```sh
//! PORT=5000 SCORER_WORKDIR=./python cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `PORT` - Listen port (default: 5000)
//! - `SCORER_INTERPRETER` / `SCORER_SCRIPT` / `SCORER_WORKDIR` - Scorer command
//! - `SCORER_TIMEOUT_SECS` - Per-invocation limit, 0 disables (default: 30)
//! - `OBSERVABILITY_ENABLED` - Enable metrics reporting (default: true)
//! - `OBSERVABILITY_INTERVAL` - Interval in seconds between metric outputs (default: 60)

use anyhow::Result;
use price_optimizer::application::pricing::PredictionService;
use price_optimizer::config::Config;
use price_optimizer::infrastructure::ProcessScorer;
use price_optimizer::infrastructure::observability::{Metrics, MetricsReporter};
use price_optimizer::interfaces::http::{self, AppState};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Initializing backend server {}...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Scorer: {} {} (cwd: {:?}, timeout: {:?})",
        config.scorer.interpreter,
        config.scorer.script,
        config.scorer.working_dir,
        config.scorer.timeout
    );
    if !config.scorer.working_dir.is_dir() {
        warn!(
            "Scorer working directory {:?} does not exist; every prediction will fail until it does",
            config.scorer.working_dir
        );
    }

    let metrics = Metrics::new()?;
    let scorer = ProcessScorer::new(config.scorer.clone());
    let service = PredictionService::new(Arc::new(scorer), metrics.clone());

    if config.observability.enabled {
        let reporter = MetricsReporter::new(metrics, config.observability.interval_seconds);
        tokio::spawn(async move {
            reporter.run().await;
        });
        info!(
            "Metrics reporter started (interval: {}s)",
            config.observability.interval_seconds
        );
    } else {
        info!("Metrics reporting disabled.");
    }

    http::serve(&config.server, AppState::new(service), shutdown_signal()).await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Exiting...");
}
