//! Recording effect handlers
//!
//! [`RecordingEffects`] implements every engine effect trait and appends
//! each call to an ordered log, so tests can assert on exact dispatcher and
//! lifecycle sequences. Clones share the same log.

use hybrid_stack_core::{
    ActionDispatcher, AppTopology, ContainerRef, ContainerResolver, LifecycleNotifier, Node,
    Topology,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// One recorded effect call
#[derive(Clone, Debug, PartialEq)]
pub enum EffectCall {
    /// `ActionDispatcher::push`
    Push(Node),
    /// `ActionDispatcher::pop`
    Pop(Node),
    /// `ActionDispatcher::pop_to`
    PopTo {
        /// Inbound request node
        node: Node,
        /// Removed nodes, bottom-up
        removed: Vec<Node>,
    },
    /// `ActionDispatcher::pop_skip`
    PopSkip {
        /// Inbound request node
        node: Node,
        /// Removed nodes, bottom-up
        removed: Vec<Node>,
    },
    /// `ActionDispatcher::replace`
    Replace(Node),
    /// `ActionDispatcher::check_node_critical`
    CheckNodeCritical(Option<Node>),
    /// `LifecycleNotifier::page_appear`
    Appear(Node),
    /// `LifecycleNotifier::page_disappear`
    Disappear(Node),
    /// `LifecycleNotifier::page_appear_with_replace`
    AppearWithReplace {
        /// Current node before the replace
        previous: Option<Node>,
        /// Current node after the replace
        current: Option<Node>,
    },
}

impl EffectCall {
    /// Short human-readable form, e.g. `pop_to a [b,c]`
    pub fn describe(&self) -> String {
        fn routes(nodes: &[Node]) -> String {
            nodes.iter().map(Node::route).collect::<Vec<_>>().join(",")
        }
        fn opt(node: &Option<Node>) -> &str {
            node.as_ref().map_or("-", Node::route)
        }

        match self {
            EffectCall::Push(node) => format!("push {}", node.route()),
            EffectCall::Pop(node) => format!("pop {}", node.route()),
            EffectCall::PopTo { node, removed } => {
                format!("pop_to {} [{}]", node.route(), routes(removed))
            }
            EffectCall::PopSkip { node, removed } => {
                format!("pop_skip {} [{}]", node.route(), routes(removed))
            }
            EffectCall::Replace(node) => format!("replace {}", node.route()),
            EffectCall::CheckNodeCritical(current) => format!("critical {}", opt(current)),
            EffectCall::Appear(node) => format!("appear {}", node.route()),
            EffectCall::Disappear(node) => format!("disappear {}", node.route()),
            EffectCall::AppearWithReplace { previous, current } => {
                format!("replaced {} -> {}", opt(previous), opt(current))
            }
        }
    }

    /// True for lifecycle notifications (appear/disappear/replace)
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            EffectCall::Appear(_) | EffectCall::Disappear(_) | EffectCall::AppearWithReplace { .. }
        )
    }
}

#[derive(Debug, Default)]
struct RecorderState {
    calls: Vec<EffectCall>,
    next_container: u64,
}

/// Effect handler that records every call
#[derive(Clone, Debug)]
pub struct RecordingEffects {
    state: Arc<Mutex<RecorderState>>,
    topology: Topology,
    fixed_container: Option<ContainerRef>,
}

impl Default for RecordingEffects {
    fn default() -> Self {
        Self::new(Topology::Mixed)
    }
}

impl RecordingEffects {
    /// Recorder answering topology queries with `topology`
    pub fn new(topology: Topology) -> Self {
        Self {
            state: Arc::new(Mutex::new(RecorderState::default())),
            topology,
            fixed_container: None,
        }
    }

    /// Recorder for a host where one embedded app owns every page
    pub fn fully_embedded() -> Self {
        Self::new(Topology::FullyEmbedded)
    }

    /// Always hand out `container` instead of fresh sequential handles
    pub fn with_fixed_container(mut self, container: ContainerRef) -> Self {
        self.fixed_container = Some(container);
        self
    }

    /// All calls so far
    pub fn calls(&self) -> Vec<EffectCall> {
        self.state.lock().calls.clone()
    }

    /// Drain and return all calls so far
    pub fn take(&self) -> Vec<EffectCall> {
        std::mem::take(&mut self.state.lock().calls)
    }

    /// Drain and describe all calls so far
    pub fn take_described(&self) -> Vec<String> {
        self.take().iter().map(EffectCall::describe).collect()
    }

    /// Lifecycle calls only, in order
    pub fn lifecycle_calls(&self) -> Vec<EffectCall> {
        self.calls()
            .into_iter()
            .filter(EffectCall::is_lifecycle)
            .collect()
    }

    /// Forget every recorded call
    pub fn clear(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, call: EffectCall) {
        tracing::trace!(call = %call.describe(), "effect recorded");
        self.state.lock().calls.push(call);
    }
}

impl ActionDispatcher for RecordingEffects {
    fn push(&self, node: &Node) {
        self.record(EffectCall::Push(node.clone()));
    }

    fn pop(&self, node: &Node) {
        self.record(EffectCall::Pop(node.clone()));
    }

    fn pop_to(&self, node: &Node, removed: &[Node]) {
        self.record(EffectCall::PopTo {
            node: node.clone(),
            removed: removed.to_vec(),
        });
    }

    fn pop_skip(&self, node: &Node, removed: &[Node]) {
        self.record(EffectCall::PopSkip {
            node: node.clone(),
            removed: removed.to_vec(),
        });
    }

    fn replace(&self, node: &Node) {
        self.record(EffectCall::Replace(node.clone()));
    }

    fn check_node_critical(&self, current: Option<&Node>) {
        self.record(EffectCall::CheckNodeCritical(current.cloned()));
    }
}

impl LifecycleNotifier for RecordingEffects {
    fn page_appear(&self, node: &Node) {
        self.record(EffectCall::Appear(node.clone()));
    }

    fn page_disappear(&self, node: &Node) {
        self.record(EffectCall::Disappear(node.clone()));
    }

    fn page_appear_with_replace(&self, previous: Option<&Node>, current: Option<&Node>) {
        self.record(EffectCall::AppearWithReplace {
            previous: previous.cloned(),
            current: current.cloned(),
        });
    }
}

impl ContainerResolver for RecordingEffects {
    fn top_container(&self) -> Option<ContainerRef> {
        if let Some(container) = self.fixed_container {
            return Some(container);
        }
        let mut state = self.state.lock();
        state.next_container += 1;
        Some(ContainerRef(state.next_container))
    }
}

impl AppTopology for RecordingEffects {
    fn is_fully_embedded_app(&self) -> bool {
        self.topology == Topology::FullyEmbedded
    }
}
