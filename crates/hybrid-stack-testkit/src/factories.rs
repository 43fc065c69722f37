//! Node and request factories
//!
//! A [`NodeFactory`] fixes the page kind and origin layer, then stamps out
//! nodes or action requests by route. Unique ids come from a process-wide
//! counter so repeated routes stay distinguishable.

use hybrid_stack_core::{
    ActionKind, ActionRequest, CloseCause, CloseNotice, Layer, Node, PageKind, Params,
};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_unique_id() -> String {
    format!("node-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Factory for nodes of one page kind and origin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeFactory {
    page_kind: PageKind,
    origin: Layer,
}

impl NodeFactory {
    /// Factory for `page_kind` nodes reported by `origin`
    pub fn new(page_kind: PageKind, origin: Layer) -> Self {
        Self { page_kind, origin }
    }

    /// Native pages announced by the native layer
    pub fn native() -> Self {
        Self::new(PageKind::Native, Layer::Native)
    }

    /// Embedded pages announced by the embedded layer
    pub fn embedded() -> Self {
        Self::new(PageKind::Embedded, Layer::Embedded)
    }

    /// Embedded pages announced by the native layer
    pub fn embedded_from_native() -> Self {
        Self::new(PageKind::Embedded, Layer::Native)
    }

    /// Native pages announced by the embedded layer (deduplicated on push)
    pub fn native_from_embedded() -> Self {
        Self::new(PageKind::Native, Layer::Embedded)
    }

    /// Fresh node with a unique id
    pub fn node(&self, route: &str) -> Node {
        Node::new(route, next_unique_id(), self.page_kind, self.origin)
    }

    /// Fresh node carrying `params`
    pub fn node_with_params(&self, route: &str, params: Params) -> Node {
        self.node(route).with_params(params)
    }

    /// Request of `kind` for a fresh node
    pub fn request(&self, kind: ActionKind, route: &str) -> ActionRequest {
        ActionRequest::new(kind, self.node(route))
    }

    /// Push request for a fresh node
    pub fn push(&self, route: &str) -> ActionRequest {
        self.request(ActionKind::Push, route)
    }

    /// Pop request for a fresh node
    pub fn pop(&self, route: &str) -> ActionRequest {
        self.request(ActionKind::Pop, route)
    }

    /// Pop-to request targeting `route`
    pub fn pop_to(&self, route: &str) -> ActionRequest {
        self.request(ActionKind::PopTo, route)
    }

    /// Pop-to-root request; the route is empty
    pub fn pop_to_root(&self) -> ActionRequest {
        self.request(ActionKind::PopToRoot, "")
    }

    /// Pop-skip request for routes containing `prefix`
    pub fn pop_skip(&self, prefix: &str) -> ActionRequest {
        self.request(ActionKind::PopSkip, prefix)
    }

    /// Replace request for a fresh node
    pub fn replace(&self, route: &str) -> ActionRequest {
        self.request(ActionKind::Replace, route)
    }

    /// Close notice for a native container
    pub fn closed(&self, route: &str) -> CloseNotice {
        CloseNotice::closed(self.node(route))
    }

    /// Close notice for a container torn down by a pop-to batch
    pub fn closed_by_pop_to(&self, route: &str) -> CloseNotice {
        CloseNotice::new(self.node(route), CloseCause::PopToBatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_per_node() {
        let factory = NodeFactory::native();
        let a = factory.node("a");
        let b = factory.node("a");
        assert_ne!(a.unique_id(), b.unique_id());
        assert_eq!(a.route(), b.route());
    }

    #[test]
    fn presets_set_kind_and_origin() {
        let node = NodeFactory::native_from_embedded().node("x");
        assert!(node.is_embedded_announced_native());
        let node = NodeFactory::embedded_from_native().node("x");
        assert_eq!(node.page_kind(), PageKind::Embedded);
        assert_eq!(node.origin(), Layer::Native);
    }
}
