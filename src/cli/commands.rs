//! CLI command definitions for trackmon.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::config::MonitorConfig;
use crate::export::{self, Snapshot};
use crate::monitor::{TrackMonitor, HISTOGRAMS};
use crate::source::EventSource;

/// Track-quality monitoring over per-event track collections.
#[derive(Parser)]
#[command(name = "trackmon")]
#[command(about = "Classify track candidates by quality and fill monitoring histograms")]
#[command(version)]
#[command(
    long_about = "trackmon reads JSON-lines event files, classifies each track candidate \
by quality, and accumulates a fixed battery of monitoring histograms.\n\nExample usage:\n  \
trackmon run --events events.jsonl --output histograms.json"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Process an event file and write a histogram snapshot.
    Run(RunArgs),

    /// List the histogram battery with its resolved binning.
    #[command(alias = "ls")]
    ListHistograms(ListHistogramsArgs),

    /// Load and validate a configuration file.
    ValidateConfig(ValidateConfigArgs),
}

/// Arguments for the run command.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Configuration file (YAML or JSON); defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON-lines event file to process.
    #[arg(short, long)]
    pub events: PathBuf,

    /// Output file for the histogram snapshot; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the list-histograms command.
#[derive(clap::Args)]
pub struct ListHistogramsArgs {
    /// Configuration file (YAML or JSON); defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the validate-config command.
#[derive(clap::Args)]
pub struct ValidateConfigArgs {
    /// Configuration file (YAML or JSON) to validate.
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Parses command-line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the subcommand selected by the parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_monitor(args),
        Commands::ListHistograms(args) => list_histograms(args),
        Commands::ValidateConfig(args) => validate_config(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MonitorConfig> {
    match path {
        Some(path) => MonitorConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(MonitorConfig::default()),
    }
}

fn run_monitor(args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let mut monitor = TrackMonitor::with_store(config)?;

    let source = EventSource::open(&args.events)
        .with_context(|| format!("failed to open event file {}", args.events.display()))?;
    for event in source {
        let event = event?;
        monitor.process_event(&event)?;
    }

    let stats = monitor.stats();
    info!(
        events = stats.events,
        skipped = stats.events_skipped,
        tracks = stats.tracks,
        high_quality = stats.high_quality_tracks,
        "Run complete"
    );

    let snapshot = Snapshot::from_store(monitor.sink());
    match args.output {
        Some(path) => export::write_snapshot(&snapshot, path)?,
        None => println!("{}", export::snapshot_to_string(&snapshot)?),
    }

    Ok(())
}

fn list_histograms(args: ListHistogramsArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    config.validate()?;

    for def in HISTOGRAMS {
        let x = config.axis(def.x.binning)?;
        match &def.y {
            None => println!(
                "{:<34} {}  1d  x: {} bins [{}, {})",
                def.name,
                def.folder(&config.top_folder),
                x.bins,
                x.min,
                x.max
            ),
            Some(y_spec) => {
                let y = config.axis(y_spec.binning)?;
                println!(
                    "{:<34} {}  2d  x: {} bins [{}, {})  y: {} bins [{}, {})",
                    def.name,
                    def.folder(&config.top_folder),
                    x.bins,
                    x.min,
                    x.max,
                    y.bins,
                    y.min,
                    y.max
                );
            }
        }
    }

    Ok(())
}

fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    let config = MonitorConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;

    // Booking the battery catches binning keys the file dropped.
    TrackMonitor::with_store(config)?;

    println!(
        "{}: OK ({} histograms bookable)",
        args.config.display(),
        HISTOGRAMS.len()
    );
    Ok(())
}
