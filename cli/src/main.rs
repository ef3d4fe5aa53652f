//! CLI entrypoint for bargaining-observer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use bargaining_application::{
    Catalog, ChannelDiagnostics, LoadCatalogUseCase, NoTranscriptLogger, RunOutcome,
    SimulationController, SimulationFeed, StreamParams, TranscriptLogger,
};
use bargaining_infrastructure::{
    ConfigLoader, FileConfig, HttpSimulationClient, JsonlTranscriptLogger, ReplayFeed,
};
use bargaining_presentation::{
    Cli, Command, ConsoleFormatter, OutputConfig, OutputFormat, ProgressReporter, RunArgs,
};
use clap::{CommandFactory, Parser};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    info!("Starting bargaining-observer");

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Presets { json } => list_presets(&config, json).await,
        Command::Agents { json } => list_agents(&config, json).await,
        Command::Run(args) => run(&config, args).await,
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` takes precedence.
///
/// The returned guard flushes the log file on drop and must live until exit.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn http_client(config: &FileConfig) -> Result<Arc<HttpSimulationClient>> {
    Ok(Arc::new(
        HttpSimulationClient::from_config(&config.server).context("Cannot create HTTP client")?,
    ))
}

async fn list_presets(config: &FileConfig, json: bool) -> Result<()> {
    let use_case = LoadCatalogUseCase::new(http_client(config)?);
    let presets = use_case.presets().await?;

    if json {
        println!("{}", ConsoleFormatter::format_json_list(&presets));
    } else {
        println!("{}", ConsoleFormatter::format_presets(&presets));
    }
    Ok(())
}

async fn list_agents(config: &FileConfig, json: bool) -> Result<()> {
    let use_case = LoadCatalogUseCase::new(http_client(config)?);
    let agents = use_case.agents().await?;

    if json {
        println!("{}", ConsoleFormatter::format_json_list(&agents));
    } else {
        println!("{}", ConsoleFormatter::format_agents(&agents));
    }
    Ok(())
}

async fn run(config: &FileConfig, args: RunArgs) -> Result<()> {
    let output = OutputConfig::resolve(
        args.output,
        config.output.format.as_deref(),
        config.output.color,
        args.quiet,
    );
    output.apply_color();

    let params = if args.strict {
        StreamParams::strict()
    } else {
        config.stream.to_stream_params()
    };

    // === Dependency Injection ===
    let (feed, catalog): (Arc<dyn SimulationFeed>, Catalog) = match &args.replay {
        Some(path) => {
            let chunk_size = args.chunk_size.unwrap_or(config.stream.replay_chunk_size);
            (
                Arc::new(ReplayFeed::new(path).with_chunk_size(chunk_size)),
                Catalog::default(),
            )
        }
        None => {
            let client = http_client(config)?;
            // Names only make the report nicer; a missing roster is not fatal
            let agents = match LoadCatalogUseCase::new(client.clone()).agents().await {
                Ok(agents) => agents,
                Err(e) => {
                    warn!("Could not load agent roster: {}", e);
                    Vec::new()
                }
            };
            (
                client,
                Catalog {
                    presets: Vec::new(),
                    agents,
                },
            )
        }
    };

    let transcript: Arc<dyn TranscriptLogger> = match args
        .transcript
        .as_ref()
        .or(config.logging.transcript.as_ref())
        .and_then(JsonlTranscriptLogger::new)
    {
        Some(logger) => {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoTranscriptLogger),
    };

    let (diagnostics, mut diagnostic_rx) = ChannelDiagnostics::channel();
    let controller = SimulationController::new(feed)
        .with_params(params)
        .with_diagnostics(Arc::new(diagnostics))
        .with_transcript_logger(transcript);

    let handle = controller.start(args.to_request());
    let snapshots = controller.subscribe();

    let progress = output.show_progress.then(ProgressReporter::new);
    let follow = async {
        if let Some(reporter) = &progress {
            reporter.follow(snapshots).await;
        }
    };

    let wait = async {
        let wait = handle.wait();
        tokio::pin!(wait);
        tokio::select! {
            outcome = &mut wait => (outcome, controller.snapshot()),
            _ = tokio::signal::ctrl_c() => {
                // Keep what was seen so far for the report; reset clears it
                let last = controller.snapshot();
                controller.reset();
                (wait.await, last)
            }
        }
    };

    let (_, (outcome, state)) = tokio::join!(follow, wait);

    let mut diagnostics = 0;
    while diagnostic_rx.try_recv().is_ok() {
        diagnostics += 1;
    }

    let report = match output.format {
        OutputFormat::Full => ConsoleFormatter::format(&state, &outcome, &catalog),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&state, &outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&state, &outcome),
    };
    println!("{}", report);

    if let Some(notice) = ConsoleFormatter::format_diagnostics_notice(diagnostics) {
        warn!("{}", notice);
    }

    match outcome {
        RunOutcome::Completed | RunOutcome::Cancelled => Ok(()),
        RunOutcome::EndedEarly => bail!("Simulation stream ended before the final outcome"),
        RunOutcome::Failed(e) => Err(e).context("Simulation run failed"),
    }
}
