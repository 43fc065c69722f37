//! Trace replay tooling for the hybrid stack
//!
//! Replays recorded channel traffic (actions plus close notifications from
//! both runtimes) against a fresh [`StackManager`](hybrid_stack_core::StackManager)
//! and reports the resulting stack, the effect sequence, and the counters.

/// `hstack` subcommands
pub mod commands;
/// Effect handlers that log each call
pub mod effects;
/// Trace file format
pub mod trace;

pub use commands::replay::{replay, ReplayReport};
pub use effects::LoggingEffects;
pub use trace::{ClosedPage, TraceEvent};
