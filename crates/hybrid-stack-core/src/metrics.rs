//! Observability counters
//!
//! Lenient paths (unknown actions, lookups that miss, ignored close notices)
//! never change control flow; they are counted here and logged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::action::ActionKind;

/// Running counters for one [`StackManager`](crate::StackManager)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackMetrics {
    /// Handled actions per kind
    pub actions: BTreeMap<String, u64>,
    /// Pushes skipped as embedded-announced native pages
    pub dedup_skips: u64,
    /// Messages whose action or page kind was not recognized
    pub unrecognized_actions: u64,
    /// Route lookups or removals that found nothing
    pub not_found: u64,
    /// Close notices ignored because their node was already handled
    pub ignored_close_notices: u64,
    /// Nodes removed by any path
    pub nodes_removed: u64,
}

impl StackMetrics {
    pub(crate) fn record_action(&mut self, kind: ActionKind) {
        *self.actions.entry(kind.as_str().to_string()).or_default() += 1;
    }

    /// Count of handled actions of `kind`
    pub fn action_count(&self, kind: ActionKind) -> u64 {
        self.actions.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Total handled actions
    pub fn total_actions(&self) -> u64 {
        self.actions.values().sum()
    }
}
