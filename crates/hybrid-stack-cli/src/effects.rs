//! Effect handlers for trace replay
//!
//! Every call is logged through `tracing` and kept as a one-line
//! description for the replay report.

use hybrid_stack_core::{
    ActionDispatcher, AppTopology, ContainerRef, ContainerResolver, LifecycleNotifier, Node,
    StaticTopology,
};
use parking_lot::Mutex;
use tracing::info;

/// Logging effect handler backed by a static topology
#[derive(Debug, Default)]
pub struct LoggingEffects {
    topology: StaticTopology,
    next_container: Mutex<u64>,
    log: Mutex<Vec<String>>,
}

impl LoggingEffects {
    /// Handler answering topology queries from `topology`
    pub fn new(topology: StaticTopology) -> Self {
        Self {
            topology,
            ..Self::default()
        }
    }

    /// Descriptions of every call so far
    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn emit(&self, line: String) {
        info!(effect = %line, "stack effect");
        self.log.lock().push(line);
    }
}

fn routes(nodes: &[Node]) -> String {
    nodes.iter().map(Node::route).collect::<Vec<_>>().join(",")
}

fn route_or_dash(node: Option<&Node>) -> &str {
    node.map_or("-", Node::route)
}

impl ActionDispatcher for LoggingEffects {
    fn push(&self, node: &Node) {
        self.emit(format!("push {node}"));
    }

    fn pop(&self, node: &Node) {
        self.emit(format!("pop {node}"));
    }

    fn pop_to(&self, node: &Node, removed: &[Node]) {
        self.emit(format!("pop_to {} [{}]", node.route(), routes(removed)));
    }

    fn pop_skip(&self, node: &Node, removed: &[Node]) {
        self.emit(format!("pop_skip {} [{}]", node.route(), routes(removed)));
    }

    fn replace(&self, node: &Node) {
        self.emit(format!("replace {node}"));
    }

    fn check_node_critical(&self, current: Option<&Node>) {
        self.emit(format!("critical {}", route_or_dash(current)));
    }
}

impl LifecycleNotifier for LoggingEffects {
    fn page_appear(&self, node: &Node) {
        self.emit(format!("appear {}", node.route()));
    }

    fn page_disappear(&self, node: &Node) {
        self.emit(format!("disappear {}", node.route()));
    }

    fn page_appear_with_replace(&self, previous: Option<&Node>, current: Option<&Node>) {
        self.emit(format!(
            "replaced {} -> {}",
            route_or_dash(previous),
            route_or_dash(current)
        ));
    }
}

impl ContainerResolver for LoggingEffects {
    fn top_container(&self) -> Option<ContainerRef> {
        let mut next = self.next_container.lock();
        *next += 1;
        Some(ContainerRef(*next))
    }
}

impl AppTopology for LoggingEffects {
    fn is_fully_embedded_app(&self) -> bool {
        self.topology.is_fully_embedded_app()
    }
}
