//! Presentation-level configuration
//!
//! Resolved settings for how a run is displayed. The binary fills this in
//! from command-line flags and the `[output]` section of the config file.

use crate::cli::commands::OutputFormat;
use clap::ValueEnum;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the live progress display while the run streams
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Combine the flag value with the configured one; the flag wins.
    ///
    /// An unrecognised configured format falls back to `full` (the config
    /// validation has already warned about it).
    pub fn resolve(
        flag: Option<OutputFormat>,
        configured: Option<&str>,
        color: bool,
        quiet: bool,
    ) -> Self {
        let format = flag
            .or_else(|| configured.and_then(|s| OutputFormat::from_str(s, true).ok()))
            .unwrap_or(OutputFormat::Full);

        Self {
            format,
            color,
            // JSON goes to stdout for other programs; keep the terminal quiet
            show_progress: !quiet && format != OutputFormat::Json,
        }
    }

    /// Apply the color setting process-wide.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
