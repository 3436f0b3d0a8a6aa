//! drivesync CLI - Google Drive to S3 mirror
//!
//! Provides commands for:
//! - Running one sync invocation
//! - Establishing (or re-establishing) the change-feed baseline
//! - Showing the stored cursor and target configuration
//! - Inspecting captured change-feed responses offline

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use drivesync_core::config::Config;

mod commands;
mod output;
mod setup;

use commands::{
    init::InitCommand, inspect::InspectCommand, status::StatusCommand, sync::SyncCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "drivesync", version, about = "Incremental Google Drive to S3 mirror")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one sync invocation against the stored cursor
    Sync(SyncCommand),
    /// Establish the change-feed baseline without mirroring anything
    Init(InitCommand),
    /// Show the stored cursor and target configuration
    Status(StatusCommand),
    /// Classify records from a captured changes response, offline
    Inspect(InspectCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicitly named config file must load; the default path may be
    // absent (defaults apply).
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path()),
    };

    // Setup tracing
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(&config, format).await,
        Commands::Init(cmd) => cmd.execute(&config, format).await,
        Commands::Status(cmd) => cmd.execute(&config, format).await,
        Commands::Inspect(cmd) => cmd.execute(&config, format).await,
    }
}
