//! Presentation layer for bargaining-observer
//!
//! This crate contains CLI definitions, output formatters and the live
//! progress reporter. Everything here reads snapshots; nothing writes to
//! the aggregate.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, RunArgs};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::report::RunReport;
pub use progress::reporter::{FeedCursor, ProgressReporter};
