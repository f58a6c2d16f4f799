//! Scorer process configuration parsing from environment variables.
//!
//! This module handles which program is launched for each prediction, from
//! which directory, and how long it may run.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCRIPT: &str = "predict.py";
pub const DEFAULT_WORKDIR: &str = "python";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn default_interpreter() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

/// Scorer process environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerEnvConfig {
    pub interpreter: String,
    pub script: String,
    pub working_dir: PathBuf,
    /// `None` disables the timeout
    pub timeout: Option<Duration>,
}

impl Default for ScorerEnvConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter().to_string(),
            script: DEFAULT_SCRIPT.to_string(),
            working_dir: PathBuf::from(DEFAULT_WORKDIR),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ScorerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let timeout = match env::var("SCORER_TIMEOUT_SECS") {
            Ok(raw) => timeout_from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid SCORER_TIMEOUT_SECS: {}", raw))?,
            ),
            Err(_) => defaults.timeout,
        };

        Ok(Self {
            interpreter: env::var("SCORER_INTERPRETER").unwrap_or(defaults.interpreter),
            script: env::var("SCORER_SCRIPT").unwrap_or(defaults.script),
            working_dir: env::var("SCORER_WORKDIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.working_dir),
            timeout,
        })
    }
}

/// `0` means no timeout.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
