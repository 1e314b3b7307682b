//! log-gate command line front end.
//!
//! # Commands
//!
//! ```text
//! check  --config FILE CATEGORY...   print enabled/disabled per category
//! dump   --config FILE               print the flattened gate table
//! replay --config FILE               gate JSON-line events read from stdin
//! ```
//!
//! `replay` hot-reloads the config file when `watch.enabled` is set and
//! stops on end of input or Ctrl-C.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use log_gate::config::{load_config, ConfigWatcher, GateConfig};
use log_gate::events::{replay, EventLogger, TracingSink};
use log_gate::gate::{report, LogGate};
use log_gate::observability::logging;

#[derive(Parser)]
#[command(name = "log-gate")]
#[command(about = "Hierarchical log gate for node lifecycle events", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate dotted categories against the config
    Check {
        #[arg(short, long)]
        config: PathBuf,

        /// Categories such as connector.session.new
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Print the flattened gate table
    Dump {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Read JSON-line events from stdin and log the enabled ones
    Replay {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config, categories } => {
            let config = load_config(&config)?;
            let gate = LogGate::from_tree(&config.categories);
            report::write_verdicts(&gate, &categories, &mut std::io::stdout().lock())?;
        }
        Commands::Dump { config } => {
            let config = load_config(&config)?;
            report::write_table(&config.categories, &mut std::io::stdout().lock())?;
        }
        Commands::Replay { config: path } => {
            let config = load_config(&path)?;
            logging::init(&config.observability)?;
            run_replay(&path, config).await?;
        }
    }

    Ok(())
}

async fn run_replay(path: &Path, config: GateConfig) -> Result<(), Box<dyn std::error::Error>> {
    let gate = Arc::new(LogGate::from_tree(&config.categories));
    let logger = EventLogger::new(gate.clone(), Arc::new(TracingSink));

    tracing::info!(
        path = ?path,
        entries = gate.snapshot().len(),
        watch = config.watch.enabled,
        "Configuration loaded"
    );

    // Keep the watcher handle alive for the whole replay.
    let (_watcher, mut updates) = if config.watch.enabled {
        let (watcher, rx) =
            ConfigWatcher::new(path, Duration::from_secs(config.watch.poll_interval_secs));
        (Some(watcher.run()?), rx)
    } else {
        let (_, rx) = tokio::sync::mpsc::unbounded_channel();
        (None, rx)
    };

    let input = BufReader::new(tokio::io::stdin());
    tokio::select! {
        stats = replay(input, &logger, &mut updates) => {
            let stats = stats?;
            tracing::info!(
                seen = stats.seen,
                emitted = stats.emitted,
                suppressed = stats.suppressed(),
                malformed = stats.malformed,
                reloads = stats.reloads,
                "Replay finished"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }

    Ok(())
}
