//! Integration test harness for logicnet.
//!
//! Drives the full pipeline from a YAML diagram document:
//! Load → Extract → Instantiate → Step → Verify.

use logicnet_graph::GraphContext;
use logicnet_shapes::{DiagramDocument, LoadedDiagram, PinType};
use logicnet_sim::{Clock, SimulationClock, SimulationRegistry, SimulationSet};

/// Test harness for simulating a diagram document.
pub struct TestHarness {
    loaded: LoadedDiagram,
    context: GraphContext,
    simulations: SimulationSet,
    clock: SimulationClock,
}

impl TestHarness {
    /// Build a harness with the built-in simulations and a 100 ms clock.
    ///
    /// # Panics
    ///
    /// Panics if the document does not load, extract or instantiate.
    pub fn from_yaml(source: &str) -> Self {
        Self::with_registry(source, &SimulationRegistry::with_builtins(), 100)
    }

    /// Build a harness with a custom registry and clock resolution.
    pub fn with_registry(source: &str, registry: &SimulationRegistry, resolution_ms: u32) -> Self {
        let loaded = load(source);
        let context = GraphContext::create(&loaded.diagram)
            .unwrap_or_else(|e| panic!("Graph extraction failed: {e}"));
        let simulations = registry
            .create(&loaded.diagram, &context)
            .unwrap_or_else(|e| panic!("Simulation setup failed: {e}"));

        Self {
            loaded,
            context,
            simulations,
            clock: SimulationClock::new(resolution_ms),
        }
    }

    /// Advance the clock and step every simulation once.
    pub fn tick(&mut self) {
        self.clock.tick();
        self.simulations.run(&self.clock);
    }

    pub fn run_ticks(&mut self, count: u64) {
        for _ in 0..count {
            self.tick();
        }
    }

    pub fn cycle(&self) -> u64 {
        self.clock.cycle()
    }

    /// Output of the group with document id `id`.
    pub fn state(&self, id: &str) -> Option<bool> {
        self.simulations
            .state(self.group(id))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn set_state(&mut self, id: &str, state: Option<bool>) {
        let group = self.group(id);
        self.simulations
            .set_state(group, state)
            .unwrap_or_else(|e| panic!("{e}"));
    }

    /// Resolved role of connector `group.connector`.
    pub fn pin_type(&self, point: &str) -> PinType {
        let id = self
            .loaded
            .point(point)
            .unwrap_or_else(|| panic!("Unknown point '{point}'"));
        self.context.pin_type(&self.loaded.diagram, id)
    }

    /// Document ids of the groups in evaluation order.
    pub fn order(&self) -> Vec<&str> {
        self.context
            .ordered_groups
            .iter()
            .map(|group| {
                self.loaded
                    .groups
                    .iter()
                    .find(|(_, shape)| *shape == group)
                    .map(|(id, _)| id.as_str())
                    .unwrap_or("?")
            })
            .collect()
    }

    pub fn context(&self) -> &GraphContext {
        &self.context
    }

    pub fn simulations(&self) -> &SimulationSet {
        &self.simulations
    }

    pub fn loaded(&self) -> &LoadedDiagram {
        &self.loaded
    }

    fn group(&self, id: &str) -> logicnet_shapes::ShapeId {
        self.loaded
            .group(id)
            .unwrap_or_else(|| panic!("Unknown group '{id}'"))
    }
}

/// Load and build a diagram document.
///
/// # Panics
///
/// Panics if the document is malformed.
pub fn load(source: &str) -> LoadedDiagram {
    DiagramDocument::from_yaml(source)
        .and_then(|document| document.build())
        .unwrap_or_else(|e| panic!("Diagram load failed: {e}"))
}

/// Extract the graph of a document, returning the error if any.
pub fn extract(source: &str) -> Result<GraphContext, logicnet_graph::Error> {
    GraphContext::create(&load(source).diagram)
}
