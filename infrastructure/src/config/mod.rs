//! Configuration file loading for bargaining-observer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `BARGAINING_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./bargaining.toml` or `./.bargaining.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/bargaining-observer/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileServerConfig, FileStreamConfig,
};
pub use loader::ConfigLoader;
