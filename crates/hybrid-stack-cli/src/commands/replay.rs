//! Replay a recorded trace against a fresh stack

use crate::effects::LoggingEffects;
use crate::trace::{load_trace, TraceEvent};
use anyhow::Result;
use clap::Args;
use hybrid_stack_core::{Layer, StackConfig, StackManager, StackMetrics, StackSnapshot};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for `hstack replay`
#[derive(Args, Debug, Clone)]
pub struct ReplayCommand {
    /// Trace file (JSON array of events)
    pub trace: PathBuf,

    /// Include every effect call in the report
    #[arg(long)]
    pub show_effects: bool,
}

/// Outcome of a replay
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    /// Number of events read from the trace
    pub events: usize,
    /// Stack after the last event
    pub snapshot: StackSnapshot,
    /// Counters accumulated during the replay
    pub metrics: StackMetrics,
    /// Events the engine refused, with the reason
    pub rejected: Vec<String>,
    /// Effect calls in dispatch order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<String>,
}

/// Feed `events` in order to a new manager built from `config`
pub fn replay(events: &[TraceEvent], config: StackConfig) -> ReplayReport {
    let effects = LoggingEffects::new(config.topology_handler());
    let mut manager = StackManager::with_config(effects, config);
    let mut rejected = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let fallback_id = format!("trace-{index}");
        let outcome = match event {
            TraceEvent::Action(message) => manager.handle_wire(message.clone()),
            TraceEvent::EmbeddedClose(page) => page
                .to_node(Layer::Embedded, &fallback_id)
                .map(|node| manager.handle_embedded_close(&node)),
            TraceEvent::NativeClose(page) => page
                .to_close_notice(&fallback_id)
                .map(|notice| manager.handle_native_close(&notice)),
        };
        if let Err(err) = outcome {
            warn!(index, error = %err, "trace event rejected");
            rejected.push(format!("event {index}: {err}"));
        }
    }

    ReplayReport {
        events: events.len(),
        snapshot: manager.snapshot(),
        metrics: manager.metrics().clone(),
        rejected,
        effects: manager.effects().log(),
    }
}

/// Handle `hstack replay`
pub fn handle_replay_command(cmd: &ReplayCommand, config: &StackConfig) -> Result<()> {
    let events = load_trace(&cmd.trace)?;
    info!(path = %cmd.trace.display(), events = events.len(), "replaying trace");

    let mut report = replay(&events, config.clone());
    if !cmd.show_effects {
        report.effects.clear();
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
