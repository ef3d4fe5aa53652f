//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of a locally running simulation engine.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// API root; `/presets`, `/agents` and `/simulate` are resolved under it
    pub base_url: String,
    /// Seconds to wait for a TCP/TLS connection
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a catalog request. The event stream is not bounded.
    pub request_timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl FileServerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
