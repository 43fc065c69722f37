//! Reverse route lookups
//!
//! Routes are not unique: the same screen can be pushed several times. Every
//! lookup scans top-down so the most recently pushed instance wins.

use crate::node::Node;
use crate::store::NodeStack;

impl NodeStack {
    /// Topmost node whose route equals `route`
    pub fn find_by_route(&self, route: &str) -> Option<&Node> {
        self.position_by_route(route).and_then(|index| self.get(index))
    }

    /// Index of the topmost node whose route equals `route`
    pub fn position_by_route(&self, route: &str) -> Option<usize> {
        if route.is_empty() {
            return None;
        }
        let found = self
            .iter_top_down()
            .find(|(_, node)| node.route() == route)
            .map(|(index, _)| index);
        if let Some(index) = found {
            tracing::trace!(route, index, "route found");
        }
        found
    }

    /// Index of the topmost node whose route contains `prefix`
    pub fn position_by_route_prefix(&self, prefix: &str) -> Option<usize> {
        if prefix.is_empty() {
            return None;
        }
        self.iter_top_down()
            .find(|(_, node)| node.route().contains(prefix))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Layer, PageKind};

    fn node(route: &str, id: &str) -> Node {
        Node::new(route, id, PageKind::Native, Layer::Native)
    }

    #[test]
    fn duplicate_routes_resolve_to_most_recent() {
        let s: NodeStack = [node("a", "1"), node("b", "2"), node("a", "3")]
            .into_iter()
            .collect();
        assert_eq!(s.position_by_route("a"), Some(2));
        assert_eq!(s.find_by_route("a").map(Node::unique_id), Some("3"));
    }

    #[test]
    fn empty_route_and_empty_stack_miss() {
        let s: NodeStack = [node("a", "1")].into_iter().collect();
        assert!(s.find_by_route("").is_none());
        assert!(NodeStack::new().find_by_route("a").is_none());
        assert!(s.find_by_route("missing").is_none());
    }

    #[test]
    fn prefix_lookup_uses_containment() {
        let s: NodeStack = [node("shop/cart", "1"), node("home", "2")]
            .into_iter()
            .collect();
        assert_eq!(s.position_by_route_prefix("shop"), Some(0));
        assert_eq!(s.position_by_route_prefix("cart"), Some(0));
        assert_eq!(s.position_by_route_prefix(""), None);
    }
}
