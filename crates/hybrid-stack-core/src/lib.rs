//! Hybrid Stack Core - Navigation Stack Reconciliation
//!
//! One logical navigation stack is rendered by two cooperating UI runtimes:
//! a native host layer and an embedded guest engine drawing inside it. Either
//! side may push or dismiss screens on its own. This crate is the single
//! source of truth for which node is on top, which nodes must go, and the
//! order lifecycle events fire in.
//!
//! # Architecture
//!
//! ## Data
//! - [`Node`]: one stack entry (route, unique id, page kind, origin layer)
//! - [`NodeStack`]: insertion-ordered store, index 0 is the root
//! - [`RemovalPlan`]: per-operation set of condemned positions
//!
//! ## Engine
//! - [`StackManager`]: dispatches [`ActionRequest`]s (push, pop, pop-to,
//!   pop-to-root, pop-skip, replace) and the two asynchronous close paths
//!
//! ## Effect Interfaces
//! - [`ActionDispatcher`]: tells the other runtime how its stack changed
//! - [`LifecycleNotifier`]: appear/disappear notifications
//! - [`ContainerResolver`], [`AppTopology`]: host queries
//!
//! The engine is synchronous and non-reentrant. Every mutating method takes
//! `&mut self`, and effect handlers only ever see shared references.

#![forbid(unsafe_code)]

/// Inbound action requests and close notices
pub mod action;

/// Runtime configuration (TOML + environment)
pub mod config;

/// Pure effect interfaces consumed by the engine
pub mod effects;

/// Reconciliation engine
pub mod engine;

/// Unified error handling
pub mod errors;

/// Reverse route lookups over the store
pub mod lookup;

/// Observability counters
pub mod metrics;

/// Stack entries
pub mod node;

/// Condemned-position bookkeeping
pub mod removal;

/// Serializable stack views
pub mod snapshot;

/// Ordered node store
pub mod store;

/// Wire-format decoding for channel messages
pub mod wire;

pub use action::{ActionKind, ActionRequest, CloseCause, CloseNotice};
pub use config::{StackConfig, StaticTopology, Topology};
pub use effects::{
    ActionDispatcher, AppTopology, ContainerResolver, LifecycleNotifier, StackEffects,
};
pub use engine::StackManager;
pub use errors::{StackError, StackResult};
pub use metrics::StackMetrics;
pub use node::{ContainerRef, Layer, Node, PageKind, Params};
pub use removal::RemovalPlan;
pub use snapshot::StackSnapshot;
pub use store::NodeStack;
pub use wire::WireMessage;
