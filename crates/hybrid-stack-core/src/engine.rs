//! # Reconciliation Engine
//!
//! [`StackManager`] owns the combined stack for one host application and
//! reconciles every inbound action against it:
//!
//! ```text
//! ActionRequest → [Mutate NodeStack] → ActionDispatcher → LifecycleNotifier
//! ```
//!
//! Close notifications from either runtime arrive separately, through
//! [`StackManager::handle_embedded_close`] and
//! [`StackManager::handle_native_close`], because container teardown lags
//! behind the action that caused it.
//!
//! The current node is always the store's top; it is never cached.

use tracing::{debug, trace, warn};

use crate::action::{ActionKind, ActionRequest, CloseCause, CloseNotice};
use crate::config::StackConfig;
use crate::effects::StackEffects;
use crate::errors::StackResult;
use crate::metrics::StackMetrics;
use crate::node::{Layer, Node, PageKind, Params};
use crate::removal::RemovalPlan;
use crate::snapshot::StackSnapshot;
use crate::store::NodeStack;
use crate::wire::WireMessage;

/// Dispatcher call a batch removal reports through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BatchReport {
    PopTo,
    PopSkip,
}

/// Owner of one combined navigation stack
pub struct StackManager<E> {
    stack: NodeStack,
    effects: E,
    config: StackConfig,
    metrics: StackMetrics,
}

impl<E: StackEffects> StackManager<E> {
    /// Create an empty stack with default configuration
    pub fn new(effects: E) -> Self {
        Self::with_config(effects, StackConfig::default())
    }

    /// Create an empty stack with explicit configuration.
    ///
    /// The manager reads only the logging settings from `config`. Topology
    /// questions go to `effects` through [`AppTopology`](crate::AppTopology);
    /// hosts driven by config build that handler with
    /// [`StackConfig::topology_handler`].
    pub fn with_config(effects: E, config: StackConfig) -> Self {
        Self {
            stack: NodeStack::new(),
            effects,
            config,
            metrics: StackMetrics::default(),
        }
    }

    /// Build an action request from raw node fields
    pub fn create_node(
        &self,
        route: impl Into<String>,
        unique_id: impl Into<String>,
        page_kind: PageKind,
        action: ActionKind,
        params: Params,
        origin: Layer,
    ) -> ActionRequest {
        ActionRequest::create(route, unique_id, page_kind, action, params, origin)
    }

    /// Node on top of the stack
    pub fn current_node(&self) -> Option<&Node> {
        self.stack.top()
    }

    /// All nodes, bottom-up
    pub fn all_nodes(&self) -> &[Node] {
        self.stack.all()
    }

    /// Topmost node routed to `route`
    pub fn find_by_route(&self, route: &str) -> Option<&Node> {
        self.stack.find_by_route(route)
    }

    /// Underlying store
    pub fn stack(&self) -> &NodeStack {
        &self.stack
    }

    /// Effect handlers the manager reports through
    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// Configuration the manager was built with
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Counters accumulated since construction
    pub fn metrics(&self) -> &StackMetrics {
        &self.metrics
    }

    /// Serializable copy of the stack, bottom-up
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot::capture(&self.stack)
    }

    /// Reconcile one action against the stack
    pub fn handle_action(&mut self, request: ActionRequest) {
        let kind = request.kind();
        self.metrics.record_action(kind);
        let _span =
            tracing::debug_span!("stack_action", action = %kind, route = %request.node().route())
                .entered();
        debug!("action start");

        match kind {
            ActionKind::Push | ActionKind::Present => self.handle_push(request),
            ActionKind::Pop | ActionKind::Dismiss => self.handle_pop(request),
            ActionKind::PopTo => self.handle_pop_to(request),
            ActionKind::PopToRoot => self.handle_pop_to_root(request),
            ActionKind::PopSkip => self.handle_pop_skip(request),
            ActionKind::Replace => self.handle_replace(request),
            ActionKind::Gesture => {
                debug!("gesture actions are not expected from the embedded layer; ignored");
            }
        }

        debug!("action end");
    }

    /// Decode a wire message and reconcile it.
    ///
    /// Undecodable messages leave the stack untouched; the error is logged,
    /// counted, and returned.
    pub fn handle_wire(&mut self, message: WireMessage) -> StackResult<()> {
        match ActionRequest::try_from(message) {
            Ok(request) => {
                self.handle_action(request);
                Ok(())
            }
            Err(err) => {
                if err.is_protocol_drift() {
                    self.metrics.unrecognized_actions += 1;
                }
                warn!(error = %err, "dropping undecodable stack message");
                Err(err)
            }
        }
    }

    /// An embedded page's view was torn down.
    ///
    /// Removes the current node only if it is embedded and routed like the
    /// closed page. The dispatcher re-checks criticality either way.
    pub fn handle_embedded_close(&mut self, node: &Node) {
        debug!(route = %node.route(), "embedded close");

        let current = self
            .stack
            .top()
            .filter(|current| current.is_embedded() && current.route() == node.route())
            .cloned();

        match current {
            Some(current) => {
                if let Some(removed) = self.stack.remove_node(&current) {
                    self.metrics.nodes_removed += 1;
                    self.effects.page_disappear(&removed);
                }
            }
            None => {
                self.metrics.ignored_close_notices += 1;
                debug!(route = %node.route(), "closed embedded page is not current; stack kept");
            }
        }

        self.refresh_current();
        self.effects.check_node_critical(self.stack.top());
    }

    /// A native container was destroyed.
    ///
    /// Notices tagged as part of a pop-to batch are ignored; that batch
    /// already removed the node.
    pub fn handle_native_close(&mut self, notice: &CloseNotice) {
        let route = notice.node().route();
        debug!(route = %route, cause = ?notice.cause(), "native close");

        if notice.cause() == CloseCause::PopToBatch {
            self.metrics.ignored_close_notices += 1;
            return;
        }
        if self.stack.is_empty() {
            self.metrics.ignored_close_notices += 1;
            return;
        }

        match self.stack.position_by_route(route) {
            Some(index) => {
                if let Some(removed) = self.stack.remove_index(index) {
                    self.metrics.nodes_removed += 1;
                    self.effects.page_disappear(&removed);
                }
            }
            None => {
                self.metrics.not_found += 1;
                debug!(route = %route, "no node for closed native container");
            }
        }

        self.refresh_current();
    }

    fn handle_push(&mut self, request: ActionRequest) {
        let node = request.into_node();

        if node.is_embedded_announced_native() {
            self.metrics.dedup_skips += 1;
            debug!(route = %node.route(), "push deduplicated; native page registers itself");
            self.bind_current_container();
            self.refresh_current();
            self.effects.push(&node);
            self.effects.page_appear(&node);
            return;
        }

        debug!(route = %node.route(), "node pushed");
        self.stack.append(node);
        self.bind_current_container();
        self.refresh_current();
        if let Some(pushed) = self.stack.top() {
            self.effects.push(pushed);
            self.effects.page_appear(pushed);
        }
    }

    fn handle_pop(&mut self, mut request: ActionRequest) {
        if request.node().origin() == Layer::Embedded {
            // Back presses on the embedded side may omit the target; the
            // node itself is removed later by `handle_embedded_close`.
            if let Some(current) = self.stack.top() {
                let route = current.route().to_string();
                let page_kind = current.page_kind();
                let node = request.node_mut();
                node.set_route(route);
                node.set_page_kind(page_kind);
            }
            self.effects.pop(request.node());
            return;
        }

        self.handle_native_close(&CloseNotice::from(request));
    }

    fn handle_pop_to(&mut self, request: ActionRequest) {
        let plan = RemovalPlan::pop_to(&self.stack, request.node().route());
        if !self.stack.is_empty() && plan.len() == self.stack.len() {
            self.metrics.not_found += 1;
            warn!(
                target_route = %request.node().route(),
                "pop-to target not in stack; every node condemned"
            );
        }
        self.commit_removals(&request, plan, BatchReport::PopTo);
    }

    fn handle_pop_to_root(&mut self, request: ActionRequest) {
        let plan = if self.effects.is_fully_embedded_app() {
            RemovalPlan::everything(&self.stack)
        } else {
            RemovalPlan::pop_to_root(&self.stack)
        };
        self.commit_removals(&request, plan, BatchReport::PopTo);
    }

    fn handle_pop_skip(&mut self, request: ActionRequest) {
        let plan = RemovalPlan::pop_skip(&self.stack, request.node().route());
        if plan.is_empty() {
            self.metrics.not_found += 1;
        }
        self.commit_removals(&request, plan, BatchReport::PopSkip);
    }

    fn handle_replace(&mut self, mut request: ActionRequest) {
        let previous = self.stack.top().cloned();

        if request.node().origin() == Layer::Embedded {
            match self.stack.top_mut() {
                Some(current) => {
                    current.set_route(request.node().route());
                    current.set_page_kind(PageKind::Embedded);
                }
                None => {
                    self.metrics.not_found += 1;
                    debug!("replace on empty stack; nothing to rewrite");
                }
            }
            request.node_mut().set_page_kind(PageKind::Embedded);
            if self.stack.top().is_some_and(|top| top.container().is_none()) {
                self.bind_current_container();
            }
        }

        self.refresh_current();
        self.effects.replace(request.node());
        self.effects
            .page_appear_with_replace(previous.as_ref(), self.stack.top());
    }

    fn commit_removals(&mut self, request: &ActionRequest, plan: RemovalPlan, report: BatchReport) {
        let previous = self.stack.top().cloned();
        let removed = plan.apply(&mut self.stack);
        self.metrics.nodes_removed += removed.len() as u64;
        self.refresh_current();

        match report {
            BatchReport::PopTo => self.effects.pop_to(request.node(), &removed),
            BatchReport::PopSkip => self.effects.pop_skip(request.node(), &removed),
        }
        if let Some(previous) = previous {
            self.effects.page_disappear(&previous);
        }
    }

    /// Bind the top container to the current node if it is embedded
    fn bind_current_container(&mut self) {
        let Some(current) = self.stack.top_mut() else {
            return;
        };
        if !current.is_embedded() {
            return;
        }
        let container = self.effects.top_container();
        current.bind_container(container);
    }

    /// Report the current node after a mutation
    fn refresh_current(&self) {
        match self.stack.top() {
            Some(current) => debug!(
                current = %current.route(),
                size = self.stack.len(),
                "current node updated"
            ),
            None => debug!("stack empty; no current node"),
        }
        if self.config.trace_snapshots {
            for (index, node) in self.stack.all().iter().enumerate() {
                trace!(index, node = %node, "stack entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ActionDispatcher, AppTopology, ContainerResolver, LifecycleNotifier};
    use crate::node::ContainerRef;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Log {
        calls: RefCell<Vec<String>>,
    }

    impl Log {
        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn take(&self) -> Vec<String> {
            self.calls.borrow_mut().drain(..).collect()
        }
    }

    fn routes(nodes: &[Node]) -> String {
        nodes.iter().map(Node::route).collect::<Vec<_>>().join(",")
    }

    impl ActionDispatcher for Log {
        fn push(&self, node: &Node) {
            self.record(format!("push {}", node.route()));
        }
        fn pop(&self, node: &Node) {
            self.record(format!("pop {}", node.route()));
        }
        fn pop_to(&self, node: &Node, removed: &[Node]) {
            self.record(format!("pop_to {} [{}]", node.route(), routes(removed)));
        }
        fn pop_skip(&self, node: &Node, removed: &[Node]) {
            self.record(format!("pop_skip {} [{}]", node.route(), routes(removed)));
        }
        fn replace(&self, node: &Node) {
            self.record(format!("replace {}", node.route()));
        }
        fn check_node_critical(&self, current: Option<&Node>) {
            self.record(format!("critical {}", current.map_or("-", Node::route)));
        }
    }

    impl LifecycleNotifier for Log {
        fn page_appear(&self, node: &Node) {
            self.record(format!("appear {}", node.route()));
        }
        fn page_disappear(&self, node: &Node) {
            self.record(format!("disappear {}", node.route()));
        }
        fn page_appear_with_replace(&self, previous: Option<&Node>, current: Option<&Node>) {
            self.record(format!(
                "replaced {} -> {}",
                previous.map_or("-", Node::route),
                current.map_or("-", Node::route)
            ));
        }
    }

    impl ContainerResolver for Log {
        fn top_container(&self) -> Option<ContainerRef> {
            Some(ContainerRef(1))
        }
    }

    impl AppTopology for Log {
        fn is_fully_embedded_app(&self) -> bool {
            false
        }
    }

    fn native(route: &str, kind: ActionKind) -> ActionRequest {
        ActionRequest::new(kind, Node::new(route, route, PageKind::Native, Layer::Native))
    }

    fn embedded(route: &str, kind: ActionKind) -> ActionRequest {
        ActionRequest::new(kind, Node::new(route, route, PageKind::Embedded, Layer::Embedded))
    }

    #[test]
    fn push_then_pop_to_reports_in_order() {
        let log = Log::default();
        let mut manager = StackManager::new(&log);
        for route in ["a", "b", "c"] {
            manager.handle_action(native(route, ActionKind::Push));
        }
        log.take();

        manager.handle_action(native("a", ActionKind::PopTo));
        assert_eq!(
            log.take(),
            vec!["pop_to a [b,c]".to_string(), "disappear c".to_string()]
        );
        assert_eq!(manager.current_node().map(Node::route), Some("a"));
    }

    #[test]
    fn embedded_push_binds_container() {
        let log = Log::default();
        let mut manager = StackManager::new(&log);
        manager.handle_action(embedded("feed", ActionKind::Push));
        assert_eq!(
            manager.current_node().and_then(Node::container),
            Some(ContainerRef(1))
        );
        assert_eq!(log.take(), vec!["push feed", "appear feed"]);
    }

    #[test]
    fn embedded_pop_borrows_current_identity() {
        let log = Log::default();
        let mut manager = StackManager::new(&log);
        manager.handle_action(embedded("feed", ActionKind::Push));
        log.take();

        manager.handle_action(embedded("", ActionKind::Pop));
        assert_eq!(log.take(), vec!["pop feed"]);
        assert_eq!(manager.all_nodes().len(), 1);
    }

    #[test]
    fn gesture_is_ignored() {
        let log = Log::default();
        let mut manager = StackManager::new(&log);
        manager.handle_action(native("a", ActionKind::Push));
        log.take();
        manager.handle_action(native("a", ActionKind::Gesture));
        assert!(log.take().is_empty());
        assert_eq!(manager.metrics().action_count(ActionKind::Gesture), 1);
    }
}
