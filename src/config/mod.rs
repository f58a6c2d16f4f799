//! Configuration module for the price optimizer.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server, Scorer, and Observability.

mod observability_config;
mod scorer_config;
mod server_config;

pub use observability_config::ObservabilityEnvConfig;
pub use scorer_config::{
    DEFAULT_SCRIPT, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKDIR, ScorerEnvConfig, default_interpreter,
    timeout_from_secs,
};
pub use server_config::{DEFAULT_ALLOWED_ORIGIN, DEFAULT_PORT, ServerEnvConfig};

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub scorer: ScorerEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let scorer = ScorerEnvConfig::from_env().context("Failed to load scorer config")?;
        let observability = ObservabilityEnvConfig::from_env();

        Ok(Self {
            server,
            scorer,
            observability,
        })
    }
}
