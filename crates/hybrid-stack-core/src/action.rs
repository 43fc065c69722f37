//! Inbound action requests
//!
//! An [`ActionRequest`] pairs the node an action refers to with the action
//! kind. Requests are transient command payloads; only the [`Node`] inside
//! ever lands in the store. The same holds for [`CloseNotice`], which carries
//! the pop-to batch marker so stored nodes never need one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StackError;
use crate::node::{Layer, Node, PageKind, Params};

/// Closed set of stack actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Open a page
    Push,
    /// Open a page modally (same stack semantics as push)
    Present,
    /// Close the top page
    Pop,
    /// Close a modal page (same stack semantics as pop)
    Dismiss,
    /// Close every page above a target route
    PopTo,
    /// Close every page above the root
    PopToRoot,
    /// Close the contiguous top run of pages whose route contains a prefix
    PopSkip,
    /// Swap the top page for another route
    Replace,
    /// Back gesture; never expected from the embedded layer
    Gesture,
}

impl ActionKind {
    /// Wire label for this action
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Push => "push",
            ActionKind::Present => "present",
            ActionKind::Pop => "pop",
            ActionKind::Dismiss => "dismiss",
            ActionKind::PopTo => "popTo",
            ActionKind::PopToRoot => "popToRoot",
            ActionKind::PopSkip => "popSkip",
            ActionKind::Replace => "replace",
            ActionKind::Gesture => "gesture",
        }
    }

    /// Get all actions in declaration order
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::Push,
            ActionKind::Present,
            ActionKind::Pop,
            ActionKind::Dismiss,
            ActionKind::PopTo,
            ActionKind::PopToRoot,
            ActionKind::PopSkip,
            ActionKind::Replace,
            ActionKind::Gesture,
        ]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StackError::UnknownAction {
                value: s.to_string(),
            })
    }
}

/// An action to reconcile against the stack
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    kind: ActionKind,
    node: Node,
    /// Set when a native pop is the container teardown of a pop-to batch
    #[serde(default)]
    pop_to_batch: bool,
}

impl ActionRequest {
    /// Request outside any pop-to batch
    pub fn new(kind: ActionKind, node: Node) -> Self {
        Self {
            kind,
            node,
            pop_to_batch: false,
        }
    }

    /// Build a request from raw node fields
    pub fn create(
        route: impl Into<String>,
        unique_id: impl Into<String>,
        page_kind: PageKind,
        kind: ActionKind,
        params: Params,
        origin: Layer,
    ) -> Self {
        let node = Node::new(route, unique_id, page_kind, origin).with_params(params);
        Self::new(kind, node)
    }

    /// Mark this request as part of a pop-to batch
    pub fn in_pop_to_batch(mut self) -> Self {
        self.pop_to_batch = true;
        self
    }

    /// Action to perform
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Inbound node
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// True when a pop-to batch already removed this node
    pub fn is_pop_to_batch(&self) -> bool {
        self.pop_to_batch
    }

    /// Take the inbound node
    pub fn into_node(self) -> Node {
        self.node
    }

    pub(crate) fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }
}

/// Why a native container went away
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseCause {
    /// The screen was closed on its own
    #[default]
    Closed,
    /// The container was torn down by a pop-to batch that already
    /// removed its node
    PopToBatch,
}

/// Notification that a native container was destroyed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloseNotice {
    node: Node,
    #[serde(default)]
    cause: CloseCause,
}

impl CloseNotice {
    /// Notice for `node` closed because of `cause`
    pub fn new(node: Node, cause: CloseCause) -> Self {
        Self { node, cause }
    }

    /// Close notice for a screen that closed on its own
    pub fn closed(node: Node) -> Self {
        Self::new(node, CloseCause::Closed)
    }

    /// Inbound node
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Why the container went away
    pub fn cause(&self) -> CloseCause {
        self.cause
    }
}

impl From<ActionRequest> for CloseNotice {
    fn from(request: ActionRequest) -> Self {
        let cause = if request.pop_to_batch {
            CloseCause::PopToBatch
        } else {
            CloseCause::Closed
        };
        Self::new(request.node, cause)
    }
}
