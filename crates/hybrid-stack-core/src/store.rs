//! Ordered node store
//!
//! Insertion order is the stack order: index 0 is the root and the last
//! element is the current node. Only append and remove are allowed, so
//! surviving nodes never change their relative order.

use std::collections::BTreeSet;

use crate::node::Node;

/// The combined navigation stack
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStack {
    nodes: Vec<Node>,
}

impl NodeStack {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a node on top
    pub fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove the nodes at `indices`, returning them bottom-up.
    ///
    /// Indices are removed highest first so earlier removals never shift the
    /// ones still pending. Out-of-range indices are skipped.
    pub fn remove_at(&mut self, indices: &BTreeSet<usize>) -> Vec<Node> {
        let mut removed = Vec::with_capacity(indices.len());
        for &index in indices.iter().rev() {
            if index < self.nodes.len() {
                removed.push(self.nodes.remove(index));
            }
        }
        removed.reverse();
        removed
    }

    /// Remove the topmost node equal to `node`
    pub fn remove_node(&mut self, node: &Node) -> Option<Node> {
        let index = self.nodes.iter().rposition(|candidate| candidate == node)?;
        Some(self.nodes.remove(index))
    }

    /// Remove the node at a single position
    pub fn remove_index(&mut self, index: usize) -> Option<Node> {
        (index < self.nodes.len()).then(|| self.nodes.remove(index))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current node, `None` when the stack is empty
    pub fn top(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Node> {
        self.nodes.last_mut()
    }

    /// Node at `index`, counted from the bottom
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// All nodes, bottom-up
    pub fn all(&self) -> &[Node] {
        &self.nodes
    }

    /// All nodes with their indices, top-down
    pub fn iter_top_down(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter().enumerate().rev()
    }

    /// Routes bottom-up, for logging and snapshots
    pub fn routes(&self) -> Vec<&str> {
        self.nodes.iter().map(Node::route).collect()
    }
}

impl FromIterator<Node> for NodeStack {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
