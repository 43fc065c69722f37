//! Hybrid Stack Testing Infrastructure
//!
//! Shared fixtures for exercising the reconciliation engine: effect
//! handlers that record every call, node factories, scenario builders, and
//! proptest strategies.
//!
//! # Usage
//!
//! ```rust,no_run
//! use hybrid_stack_testkit::*;
//!
//! let scenario = Scenario::mixed().with_native_stack(&["home", "list", "detail"]);
//! let mut manager = scenario.build();
//! manager.handle_action(NodeFactory::native().pop_to("home"));
//! assert_eq!(manager.snapshot().routes(), vec!["home"]);
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

/// Recording effect handlers
pub mod effects;
/// Node and request factories
pub mod factories;
/// Test log setup
pub mod logging;
/// Seeded manager builder
pub mod scenario;
/// Proptest strategies
pub mod strategies;

pub use effects::{EffectCall, RecordingEffects};
pub use factories::NodeFactory;
pub use logging::init_test_tracing;
pub use scenario::Scenario;
