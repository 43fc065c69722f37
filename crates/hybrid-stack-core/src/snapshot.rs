//! Serializable stack views

use serde::{Deserialize, Serialize};

use crate::node::{Node, PageKind};
use crate::store::NodeStack;

/// One row of a [`StackSnapshot`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Node route
    pub route: String,
    /// Node instance id
    pub unique_id: String,
    /// Runtime rendering the node
    pub page_kind: PageKind,
}

impl From<&Node> for SnapshotEntry {
    fn from(node: &Node) -> Self {
        Self {
            route: node.route().to_string(),
            unique_id: node.unique_id().to_string(),
            page_kind: node.page_kind(),
        }
    }
}

/// Point-in-time copy of the stack, bottom-up
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSnapshot {
    /// Entries, bottom-up
    pub entries: Vec<SnapshotEntry>,
}

impl StackSnapshot {
    /// Copy the store as it is now
    pub fn capture(stack: &NodeStack) -> Self {
        Self {
            entries: stack.all().iter().map(SnapshotEntry::from).collect(),
        }
    }

    /// Route of the current node
    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(|entry| entry.route.as_str())
    }

    /// Routes, bottom-up
    pub fn routes(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.route.as_str()).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
