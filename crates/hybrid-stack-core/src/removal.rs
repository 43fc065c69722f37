//! Condemned-position bookkeeping
//!
//! A [`RemovalPlan`] is computed from the store, applied once, and dropped.
//! Nothing carries over between operations.

use std::collections::BTreeSet;

use crate::store::NodeStack;

/// Positions selected for removal by one batch operation, top-down
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    indices: Vec<usize>,
}

impl RemovalPlan {
    /// Condemn every node above the topmost node routed to `target`.
    ///
    /// The scan runs the whole stack; a match only stops collection. With no
    /// match every node is condemned.
    pub fn pop_to(stack: &NodeStack, target: &str) -> Self {
        let mut collecting = true;
        let mut indices = Vec::new();
        for (index, node) in stack.iter_top_down() {
            if node.route() == target {
                collecting = false;
            }
            if collecting {
                indices.push(index);
            }
        }
        Self { indices }
    }

    /// Condemn everything except the root
    pub fn pop_to_root(stack: &NodeStack) -> Self {
        let indices = stack
            .iter_top_down()
            .map(|(index, _)| index)
            .filter(|&index| index != 0)
            .collect();
        Self { indices }
    }

    /// Condemn the contiguous top run whose routes contain `prefix`.
    ///
    /// Stops at the first miss even when deeper nodes would match. Every
    /// route contains the empty prefix, so `""` condemns the whole stack.
    pub fn pop_skip(stack: &NodeStack, prefix: &str) -> Self {
        let indices = stack
            .iter_top_down()
            .take_while(|(_, node)| node.route().contains(prefix))
            .map(|(index, _)| index)
            .collect();
        Self { indices }
    }

    /// Condemn every node
    pub fn everything(stack: &NodeStack) -> Self {
        Self {
            indices: stack.iter_top_down().map(|(index, _)| index).collect(),
        }
    }

    /// Condemned indices, top-down
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of condemned nodes
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Remove the condemned nodes, returning them bottom-up
    pub fn apply(self, stack: &mut NodeStack) -> Vec<crate::node::Node> {
        tracing::debug!(indices = ?self.indices, "removing condemned nodes");
        let indices: BTreeSet<usize> = self.indices.into_iter().collect();
        stack.remove_at(&indices)
    }
}
