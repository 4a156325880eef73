// analyze-upload/src/config.rs

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::contract::ANALYZE_ENDPOINT;

/// Flask's development server address, where the analysis endpoint usually lives.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub upload: UploadSection,
}

impl Config {
    /// Base URL joined with the fixed `/analyze` path, with exactly one slash between.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.server.base_url.trim_end_matches('/'),
            ANALYZE_ENDPOINT
        )
    }

    /// `None` means requests may hang indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.upload.timeout_secs.map(Duration::from_secs)
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.server.base_url,
            endpoint = ANALYZE_ENDPOINT,
            "Loaded Config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        ServerSection {
            base_url: default_base_url(),
        }
    }
}

/// The endpoint path itself is not configurable; uploads always go to `/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadSection {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
