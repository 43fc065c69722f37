//! hstack - replay and inspect hybrid navigation stack traces

use anyhow::Result;
use clap::{Parser, Subcommand};
use hybrid_stack_cli::commands::config::{handle_config_command, load_config, ConfigCommand};
use hybrid_stack_cli::commands::replay::{handle_replay_command, ReplayCommand};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hstack")]
#[command(about = "Hybrid navigation stack trace tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded trace and print the resulting stack
    Replay(ReplayCommand),
    /// Print the effective configuration
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    let result = match &cli.command {
        Commands::Replay(cmd) => handle_replay_command(cmd, &config),
        Commands::Config(cmd) => handle_config_command(cmd, &config),
    };
    if let Err(err) = &result {
        error!(error = %err, "command failed");
    }
    result
}
