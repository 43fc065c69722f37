//! Inspect the effective engine configuration

use anyhow::{Context, Result};
use clap::Args;
use hybrid_stack_core::StackConfig;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for `hstack config`
#[derive(Args, Debug, Clone)]
pub struct ConfigCommand {
    /// Load this file instead of the global `--config`
    pub path: Option<PathBuf>,
}

/// Resolve configuration: file (if any), then `HYBRID_STACK_*` overrides
pub fn load_config(path: Option<&Path>) -> Result<StackConfig> {
    let mut config = match path {
        Some(path) => StackConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => StackConfig::default(),
    };
    config.merge_with_env()?;
    Ok(config)
}

/// Handle `hstack config`
pub fn handle_config_command(cmd: &ConfigCommand, config: &StackConfig) -> Result<()> {
    let effective = match &cmd.path {
        Some(path) => load_config(Some(path))?,
        None => config.clone(),
    };
    info!(topology = ?effective.topology, "configuration loaded");
    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}
