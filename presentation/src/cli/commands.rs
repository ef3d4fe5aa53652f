//! CLI command definitions

use bargaining_domain::{ExportPressure, MacroParameters, SimulationRequest};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Report format for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rounds, settlements, conflicts and the final outcome
    Full,
    /// Only the final outcome per bargaining table
    Summary,
    /// Machine-readable JSON report
    Json,
}

/// CLI arguments for bargaining-observer
#[derive(Parser, Debug)]
#[command(name = "bargaining-observer")]
#[command(author, version, about = "Follow a wage-bargaining simulation as it streams")]
#[command(long_about = r#"
bargaining-observer starts a wage-bargaining simulation on a running engine
and follows its event stream: rounds, agent positions, conflicts, mediation
and settlements, until the engine announces the final outcome.

Configuration is merged from (highest priority first):
1. BARGAINING_<SECTION>__<KEY>   Environment variables
2. --config <path>                Explicit config file
3. ./bargaining.toml              Project-level config
4. ~/.config/bargaining-observer/config.toml   Global config

Example:
  bargaining-observer presets
  bargaining-observer run --preset inflationschock
  bargaining-observer run --inflation 6.5 --export-pressure high --output summary
  bargaining-observer run --replay capture.sse --output json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the scenario presets offered by the engine
    Presets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the negotiating agents
    Agents {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Start a simulation and follow it to the end
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Scenario preset id
    #[arg(short, long, value_name = "ID")]
    pub preset: Option<String>,

    /// CPI inflation, percent (0-15)
    #[arg(long, conflicts_with = "preset")]
    pub inflation: Option<f64>,

    /// Unemployment, percent (2-15)
    #[arg(long, conflicts_with = "preset")]
    pub unemployment: Option<f64>,

    /// GDP growth, percent (-5-8)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "preset")]
    pub gdp_growth: Option<f64>,

    /// Policy rate, percent (-0.5-10)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "preset")]
    pub policy_rate: Option<f64>,

    /// Political climate, 1 (left) to 5 (right)
    #[arg(long, conflicts_with = "preset")]
    pub political_climate: Option<u8>,

    /// Export pressure: low, medium or high
    #[arg(long, conflicts_with = "preset")]
    pub export_pressure: Option<ExportPressure>,

    /// Previous benchmark settlement, percent (0-8)
    #[arg(long, conflicts_with = "preset")]
    pub previous_agreement: Option<f64>,

    /// Replay a captured event stream instead of contacting the engine
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Chunk size in bytes used for --replay
    #[arg(long, value_name = "BYTES", requires = "replay")]
    pub chunk_size: Option<usize>,

    /// Write a JSONL transcript of the run
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Abort on the first malformed or unknown record
    #[arg(long)]
    pub strict: bool,

    /// Suppress the live progress display
    #[arg(short, long)]
    pub quiet: bool,

    /// Report format (defaults to output.format from config, then full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

impl RunArgs {
    fn has_parameter_overrides(&self) -> bool {
        self.inflation.is_some()
            || self.unemployment.is_some()
            || self.gdp_growth.is_some()
            || self.policy_rate.is_some()
            || self.political_climate.is_some()
            || self.export_pressure.is_some()
            || self.previous_agreement.is_some()
    }

    /// Parameters from the defaults with every given override applied.
    pub fn parameters(&self) -> MacroParameters {
        let defaults = MacroParameters::default();
        MacroParameters {
            inflation: self.inflation.unwrap_or(defaults.inflation),
            unemployment: self.unemployment.unwrap_or(defaults.unemployment),
            gdp_growth: self.gdp_growth.unwrap_or(defaults.gdp_growth),
            policy_rate: self.policy_rate.unwrap_or(defaults.policy_rate),
            political_climate: self.political_climate.unwrap_or(defaults.political_climate),
            export_pressure: self.export_pressure.unwrap_or(defaults.export_pressure),
            previous_agreement: self.previous_agreement.unwrap_or(defaults.previous_agreement),
        }
    }

    /// Build the simulate request.
    ///
    /// A preset wins. Without one, any parameter flag produces a custom
    /// request. With neither, a live run sends the empty request (which
    /// the engine rejects) while a replay uses default parameters, since
    /// the captured stream ignores the request.
    pub fn to_request(&self) -> SimulationRequest {
        if let Some(preset) = &self.preset {
            return SimulationRequest::preset(preset.clone());
        }
        if self.has_parameter_overrides() || self.replay.is_some() {
            return SimulationRequest::custom(self.parameters());
        }
        SimulationRequest::default()
    }
}
