//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into application types
//! happens through the `to_*` helpers.

mod logging;
mod output;
mod server;
mod stream;

pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use server::{DEFAULT_BASE_URL, FileServerConfig};
pub use stream::FileStreamConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("server.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("server.base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("server.connect_timeout_secs cannot be 0")]
    ZeroConnectTimeout,

    #[error("stream.replay_chunk_size cannot be 0")]
    ZeroChunkSize,

    #[error("output.format: unknown value '{0}' (expected one of: full, summary, json)")]
    UnknownOutputFormat(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Simulation engine endpoint
    pub server: FileServerConfig,
    /// Event-stream handling
    pub stream: FileStreamConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            issues.push(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        if self.server.connect_timeout_secs == 0 {
            issues.push(ConfigValidationError::ZeroConnectTimeout);
        }

        if self.stream.replay_chunk_size == 0 {
            issues.push(ConfigValidationError::ZeroChunkSize);
        }

        if let Some(format) = &self.output.format
            && format.parse::<FileOutputFormat>().is_err()
        {
            issues.push(ConfigValidationError::UnknownOutputFormat(format.clone()));
        }

        issues
    }
}
