//! HTTP server configuration parsing from environment variables.
//!
//! This module handles the listen address and the CORS origin allow-list.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ALLOWED_ORIGIN: &str =
    "https://product-price-optimization-app-frontend.onrender.com";

/// HTTP server environment configuration
#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub port: u16,
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: "0.0.0.0".to_string(),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {}", raw))?,
            Err(_) => defaults.port,
        };

        let bind_address = env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address);

        let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => defaults.allowed_origins,
        };

        Ok(Self {
            port,
            bind_address,
            allowed_origins,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
