//! Stack configuration
//!
//! Loaded from TOML, then overridden from `HYBRID_STACK_*` environment
//! variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::effects::AppTopology;
use crate::errors::{StackError, StackResult};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "HYBRID_STACK_";

/// How pages are split between the two runtimes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Native host with embedded pages mixed in
    #[default]
    Mixed,
    /// A single embedded application owns every page
    FullyEmbedded,
}

impl FromStr for Topology {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mixed" => Ok(Topology::Mixed),
            "fully_embedded" | "fully-embedded" => Ok(Topology::FullyEmbedded),
            other => Err(StackError::config(format!("unknown topology '{other}'"))),
        }
    }
}

/// Engine configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    /// Host topology, answered to the engine through [`StackConfig::topology_handler`]
    pub topology: Topology,
    /// Log the whole stack after every operation
    pub trace_snapshots: bool,
}

impl StackConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> StackResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StackError::io(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> StackResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `HYBRID_STACK_*` overrides from the process environment
    pub fn merge_with_env(&mut self) -> StackResult<()> {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                self.set_from_string(&config_key.to_lowercase(), &value)?;
            }
        }
        Ok(())
    }

    /// Set a configuration value from a string (for env and CLI parsing)
    pub fn set_from_string(&mut self, key: &str, value: &str) -> StackResult<()> {
        match key {
            "topology" => self.topology = value.parse()?,
            "trace_snapshots" => {
                self.trace_snapshots = parse_bool(value)
                    .ok_or_else(|| StackError::config(format!("invalid bool '{value}'")))?;
            }
            other => {
                return Err(StackError::config(format!("unknown config key '{other}'")));
            }
        }
        Ok(())
    }

    /// Topology query backed by this configuration
    pub fn topology_handler(&self) -> StaticTopology {
        StaticTopology::new(self.topology)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// [`AppTopology`] answering from a fixed [`Topology`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticTopology {
    topology: Topology,
}

impl StaticTopology {
    /// Handler for a fixed topology
    pub fn new(topology: Topology) -> Self {
        Self { topology }
    }
}

impl AppTopology for StaticTopology {
    fn is_fully_embedded_app(&self) -> bool {
        self.topology == Topology::FullyEmbedded
    }
}
