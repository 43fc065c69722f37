//! Effect interfaces for the reconciliation engine
//!
//! The engine decides *what* changed; hosts implement these traits to
//! decide *how* the other runtime and the screens hear about it. All calls
//! are synchronous and happen on the thread driving the engine.
//!
//! Handlers receive shared references only. They must not call back into
//! the [`StackManager`](crate::StackManager) that invoked them.

use crate::node::{ContainerRef, Node};

/// Forwards committed stack changes to the other runtime
pub trait ActionDispatcher {
    /// A node was pushed
    fn push(&self, node: &Node);

    /// A pop was requested by the embedded layer
    fn pop(&self, node: &Node);

    /// A pop-to or pop-to-root removed `removed` (bottom-up)
    fn pop_to(&self, node: &Node, removed: &[Node]);

    /// A pop-skip removed `removed` (bottom-up)
    fn pop_skip(&self, node: &Node, removed: &[Node]);

    /// The top node was replaced
    fn replace(&self, node: &Node);

    /// Re-check whether the stack reached a critical state (e.g. empty)
    fn check_node_critical(&self, current: Option<&Node>);
}

/// Screen-level enter/exit notifications
pub trait LifecycleNotifier {
    fn page_appear(&self, node: &Node);

    fn page_disappear(&self, node: &Node);

    /// Replace transition, fired once with both ends
    fn page_appear_with_replace(&self, previous: Option<&Node>, current: Option<&Node>);
}

/// Supplies the native container that hosts newly current embedded pages
pub trait ContainerResolver {
    fn top_container(&self) -> Option<ContainerRef>;
}

/// Host application topology
pub trait AppTopology {
    /// True when every page belongs to a single embedded application
    fn is_fully_embedded_app(&self) -> bool;
}

/// Composite trait bound for everything the engine calls out to
pub trait StackEffects: ActionDispatcher + LifecycleNotifier + ContainerResolver + AppTopology {}

// Blanket impl for any type implementing all required traits
impl<T> StackEffects for T where T: ActionDispatcher + LifecycleNotifier + ContainerResolver + AppTopology {}

impl<T: ActionDispatcher + ?Sized> ActionDispatcher for &T {
    fn push(&self, node: &Node) {
        (**self).push(node);
    }

    fn pop(&self, node: &Node) {
        (**self).pop(node);
    }

    fn pop_to(&self, node: &Node, removed: &[Node]) {
        (**self).pop_to(node, removed);
    }

    fn pop_skip(&self, node: &Node, removed: &[Node]) {
        (**self).pop_skip(node, removed);
    }

    fn replace(&self, node: &Node) {
        (**self).replace(node);
    }

    fn check_node_critical(&self, current: Option<&Node>) {
        (**self).check_node_critical(current);
    }
}

impl<T: LifecycleNotifier + ?Sized> LifecycleNotifier for &T {
    fn page_appear(&self, node: &Node) {
        (**self).page_appear(node);
    }

    fn page_disappear(&self, node: &Node) {
        (**self).page_disappear(node);
    }

    fn page_appear_with_replace(&self, previous: Option<&Node>, current: Option<&Node>) {
        (**self).page_appear_with_replace(previous, current);
    }
}

impl<T: ContainerResolver + ?Sized> ContainerResolver for &T {
    fn top_container(&self) -> Option<ContainerRef> {
        (**self).top_container()
    }
}

impl<T: AppTopology + ?Sized> AppTopology for &T {
    fn is_fully_embedded_app(&self) -> bool {
        (**self).is_fully_embedded_app()
    }
}
