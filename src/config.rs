//! Configuration loader for the `weather-gateway` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::{anyhow, Result};

/// Parse an optional socket address environment variable with a default value.
macro_rules! parse_env_addr {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<SocketAddr>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or_else(|| SocketAddr::from($default))
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Upstream weather provider base URL, without trailing slash.
    pub api_base_url: String,

    /// Upstream weather provider API key.
    pub api_key: String,

    /// Display name of the data source, echoed as `source`.
    pub source_name: String,

    /// Attribution URL of the data source, echoed as `source_link`.
    pub source_link: String,

    /// Keys accepted from clients of this service.
    pub client_api_keys: Vec<String>,

    /// Path to the static condition-code dataset.
    pub conditions_path: PathBuf,

    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `WEATHER_API_BASE_URL` – upstream provider base URL
/// - `WEATHER_API_KEY` – upstream provider key
/// - `WEATHER_API_SOURCE_NAME` – data source display name
/// - `WEATHER_API_SOURCE_LINK` – data source attribution URL
/// - `CLIENT_API_KEYS` – comma-separated client keys
///
/// Optional:
/// - `CONDITIONS_PATH` – condition dataset (default: `conditions.json`)
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_base_url = require_env!("WEATHER_API_BASE_URL");
    let api_key = require_env!("WEATHER_API_KEY");
    let source_name = require_env!("WEATHER_API_SOURCE_NAME");
    let source_link = require_env!("WEATHER_API_SOURCE_LINK");
    let client_api_keys = parse_key_list(&require_env!("CLIENT_API_KEYS"));
    let conditions_path = env::var("CONDITIONS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("conditions.json"));
    let bind_addr = parse_env_addr!("BIND_ADDR", ([0, 0, 0, 0], 8080));

    if client_api_keys.is_empty() {
        return Err(anyhow!("CLIENT_API_KEYS must contain at least one key"));
    }

    Ok(Config {
        api_base_url: api_base_url.trim_end_matches('/').to_string(),
        api_key,
        source_name,
        source_link,
        client_api_keys,
        conditions_path,
        bind_addr,
    })
}

/// Split a comma-separated key list, dropping blanks.
fn parse_key_list(raw: &str) -> Vec<String> {
    // ---
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Replace all but the last four characters of a secret with `*`.
fn mask_secret(secret: &str) -> String {
    // ---
    let visible = secret.chars().count().saturating_sub(4);
    secret
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { c })
        .collect()
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the upstream key and only reports how many client keys exist.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  WEATHER_API_BASE_URL    : {}", self.api_base_url);
        tracing::info!("  WEATHER_API_KEY         : {}", mask_secret(&self.api_key));
        tracing::info!("  WEATHER_API_SOURCE_NAME : {}", self.source_name);
        tracing::info!("  WEATHER_API_SOURCE_LINK : {}", self.source_link);
        tracing::info!("  CLIENT_API_KEYS         : {} key(s)", self.client_api_keys.len());
        tracing::info!("  CONDITIONS_PATH         : {}", self.conditions_path.display());
        tracing::info!("  BIND_ADDR               : {}", self.bind_addr);
    }
}
