//! launcher-status CLI
//!
//! Main entry point for the launcher-status command-line tool.

mod render;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use launcher_status::{StatusConfig, StatusPoller};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "launcher-status")]
#[command(about = "Check and watch the status of upstream game services", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Status endpoint, overrides the configuration
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch statuses once and print the panel
    Check {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Poll continuously and print the panel on every change
    Watch {
        /// Seconds between refreshes, overrides the configuration
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Print the resolved configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<StatusConfig> {
    let mut config =
        StatusConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
        config.validate().context("Invalid --endpoint")?;
    }

    debug!(endpoint = %config.endpoint, "Configuration resolved");
    Ok(config)
}

async fn run_check(config: &StatusConfig, format: OutputFormat, use_color: bool) -> anyhow::Result<()> {
    let poller = StatusPoller::from_config(config)?;
    let outcome = poller.fetch_once().await;

    if !outcome.is_updated() {
        bail!("Could not retrieve service statuses from {}", config.endpoint);
    }

    let snapshot = poller.snapshot();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&render::snapshot_json(&snapshot))?);
        }
        OutputFormat::Text => print!("{}", render::render_panel(&snapshot, use_color)),
    }
    Ok(())
}

async fn run_watch(config: StatusConfig, interval: Option<u64>, use_color: bool) -> anyhow::Result<()> {
    let config = match interval {
        Some(secs) => config.with_poll_interval(Duration::from_secs(secs)),
        None => config,
    };
    config.validate().context("Invalid --interval")?;

    let poller = StatusPoller::from_config(&config)?;
    let mut updates = poller.subscribe();
    poller.start().await?;

    print!("{}", render::render_panel(&updates.borrow_and_update(), use_color));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted, stopping");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                println!();
                print!("{}", render::render_panel(&snapshot, use_color));
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = !cli.no_color && colored::control::SHOULD_COLORIZE.should_colorize();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Check { format } => run_check(&config, format, use_color).await,
        Commands::Watch { interval } => run_watch(config, interval, use_color).await,
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}
