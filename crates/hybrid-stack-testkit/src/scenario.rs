//! Scenario builder
//!
//! Builds a [`StackManager`] wired to [`RecordingEffects`] and pre-seeded
//! through ordinary push actions, then clears the recorder so assertions
//! only see calls made by the test itself.

use hybrid_stack_core::{StackConfig, StackManager, Topology};

use crate::effects::RecordingEffects;
use crate::factories::NodeFactory;

/// Seed step for a scenario
#[derive(Clone, Debug)]
struct Seed {
    factory: NodeFactory,
    route: String,
}

/// Builder for a pre-populated manager
#[derive(Clone, Debug)]
pub struct Scenario {
    config: StackConfig,
    seeds: Vec<Seed>,
}

impl Scenario {
    /// Native host with embedded pages mixed in
    pub fn mixed() -> Self {
        Self::with_topology(Topology::Mixed)
    }

    /// Single embedded application owning every page
    pub fn fully_embedded() -> Self {
        Self::with_topology(Topology::FullyEmbedded)
    }

    /// Empty scenario for `topology`
    pub fn with_topology(topology: Topology) -> Self {
        Self {
            config: StackConfig {
                topology,
                ..StackConfig::default()
            },
            seeds: Vec::new(),
        }
    }

    /// Dump every stack entry at trace level after each operation
    pub fn tracing_snapshots(mut self) -> Self {
        self.config.trace_snapshots = true;
        self
    }

    /// Push `routes` (bottom-up) as native pages
    pub fn with_native_stack(self, routes: &[&str]) -> Self {
        self.with_stack(NodeFactory::native(), routes)
    }

    /// Push `routes` (bottom-up) as embedded pages
    pub fn with_embedded_stack(self, routes: &[&str]) -> Self {
        self.with_stack(NodeFactory::embedded(), routes)
    }

    /// Push `routes` (bottom-up) using `factory`
    pub fn with_stack(mut self, factory: NodeFactory, routes: &[&str]) -> Self {
        self.seeds.extend(routes.iter().map(|route| Seed {
            factory,
            route: (*route).to_string(),
        }));
        self
    }

    /// Build the manager and clear the recorder
    pub fn build(self) -> StackManager<RecordingEffects> {
        let effects = RecordingEffects::new(self.config.topology);
        let mut manager = StackManager::with_config(effects, self.config);
        for seed in &self.seeds {
            manager.handle_action(seed.factory.push(&seed.route));
        }
        manager.effects().clear();
        manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_in_order_and_clears_log() {
        let manager = Scenario::mixed()
            .with_native_stack(&["a", "b"])
            .with_embedded_stack(&["c"])
            .build();
        assert_eq!(manager.snapshot().routes(), vec!["a", "b", "c"]);
        assert!(manager.effects().calls().is_empty());
    }
}
