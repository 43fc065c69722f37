//! Proptest strategies for stack actions

use hybrid_stack_core::{ActionKind, ActionRequest, Layer, Node, PageKind};
use proptest::prelude::*;

/// Short route names drawn from a small alphabet so collisions happen
pub fn arb_route() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["home", "list", "detail", "shop/cart", "shop/pay", "profile"])
        .prop_map(str::to_string)
}

/// Distinct route names, sorted
pub fn arb_distinct_routes(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(0u32..10_000, 1..=max)
        .prop_map(|ids| ids.into_iter().map(|id| format!("route{id}")).collect())
}

/// Either page kind
pub fn arb_page_kind() -> impl Strategy<Value = PageKind> {
    prop_oneof![Just(PageKind::Native), Just(PageKind::Embedded)]
}

/// Either origin layer
pub fn arb_layer() -> impl Strategy<Value = Layer> {
    prop_oneof![Just(Layer::Native), Just(Layer::Embedded)]
}

/// Node with a random route, kind and origin
pub fn arb_node() -> impl Strategy<Value = Node> {
    (arb_route(), any::<u16>(), arb_page_kind(), arb_layer()).prop_map(
        |(route, id, page_kind, origin)| Node::new(route, format!("p{id}"), page_kind, origin),
    )
}

/// Any action kind
pub fn arb_action_kind() -> impl Strategy<Value = ActionKind> {
    prop::sample::select(ActionKind::all().to_vec())
}

/// Arbitrary action with an arbitrary node
pub fn arb_request() -> impl Strategy<Value = ActionRequest> {
    (arb_action_kind(), arb_node()).prop_map(|(kind, node)| ActionRequest::new(kind, node))
}

/// Push request that is never deduplicated
pub fn arb_recorded_push() -> impl Strategy<Value = ActionRequest> {
    arb_node()
        .prop_filter("embedded-announced native pushes are deduplicated", |node| {
            !node.is_embedded_announced_native()
        })
        .prop_map(|node| ActionRequest::new(ActionKind::Push, node))
}
