//! `load_config` module: reads the optional YAML config and layers environment overrides on top.
//!
//! Precedence, lowest to highest:
//! 1. Built-in defaults (see [`crate::config`])
//! 2. The YAML file, when a path is given
//! 3. `ANALYZE_BASE_URL` from the environment (or a `.env` file loaded by the binary)
//!
//! The CLI applies `--base-url` on top of the result.
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::Config;

/// Environment variable that overrides `server.base_url`.
pub const BASE_URL_ENV: &str = "ANALYZE_BASE_URL";

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        if base_url.trim().is_empty() {
            warn!(var = BASE_URL_ENV, "Ignoring empty base URL override");
        } else {
            info!(var = BASE_URL_ENV, base_url = %base_url, "Base URL overridden from environment");
            config.server.base_url = base_url;
        }
    }

    config.trace_loaded();
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    info!(config_path = ?path, "Loading configuration from file");

    let content = match fs::read_to_string(path) {
        Ok(content) => {
            info!(config_path = ?path, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path,
                e
            ));
        }
    };

    // An empty file is a valid "all defaults" config.
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    match serde_yaml::from_str::<Config>(&content) {
        Ok(config) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
