//! Diagram simulation runner.
//!
//! Loads a diagram document, extracts its logic network, instantiates the
//! built-in simulations and steps them on a [`SimulationClock`].

pub mod config;
pub mod error;

use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use logicnet_graph::GraphContext;
use logicnet_shapes::{LoadedDiagram, ShapeId};
use logicnet_sim::{Clock, SimulationClock, SimulationRegistry, SimulationSet};

pub use config::{RunConfig, ScheduledEvent};
pub use error::{Result, RunError};

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "logicnet_run=info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// A loaded diagram with its simulations and clock.
#[derive(Debug)]
pub struct Session {
    loaded: LoadedDiagram,
    context: GraphContext,
    simulations: SimulationSet,
    clock: SimulationClock,
    config: RunConfig,
}

impl Session {
    /// Extract, instantiate and apply the initial states of `config`, then
    /// its events scheduled for cycle 0.
    pub fn new(loaded: LoadedDiagram, config: RunConfig, registry: &SimulationRegistry) -> Result<Self> {
        for id in config.referenced_groups() {
            if loaded.group(id).is_none() {
                return Err(RunError::UnknownGroup(id.to_string()));
            }
        }

        let context = if config.ignore_cycles {
            GraphContext::create_ignoring_cycles(&loaded.diagram)?
        } else {
            GraphContext::create(&loaded.diagram)?
        };
        let simulations = registry.create(&loaded.diagram, &context)?;

        let mut session = Self {
            loaded,
            context,
            simulations,
            clock: SimulationClock::new(config.resolution_ms),
            config,
        };
        let initial: Vec<_> = session
            .config
            .initial
            .iter()
            .map(|(id, state)| (id.clone(), *state))
            .collect();
        for (id, state) in initial {
            session.set_state(&id, state)?;
        }
        session.apply_events(0)?;

        info!(
            groups = session.loaded.groups.len(),
            order = ?session.order(),
            "session ready"
        );
        Ok(session)
    }

    pub fn context(&self) -> &GraphContext {
        &self.context
    }

    pub fn simulations(&self) -> &SimulationSet {
        &self.simulations
    }

    pub fn cycle(&self) -> u64 {
        self.clock.cycle()
    }

    /// Group ids in evaluation order.
    pub fn order(&self) -> Vec<&str> {
        self.context
            .ordered_groups
            .iter()
            .filter_map(|group| self.group_id(*group))
            .collect()
    }

    pub fn state(&self, id: &str) -> Result<Option<bool>> {
        let group = self.resolve(id)?;
        Ok(self.simulations.state(group)?)
    }

    pub fn set_state(&mut self, id: &str, state: Option<bool>) -> Result<()> {
        let group = self.resolve(id)?;
        debug!(group = id, ?state, "state forced");
        Ok(self.simulations.set_state(group, state)?)
    }

    /// Advance the clock, apply the events scheduled for the new cycle and
    /// step every simulation.
    pub fn step(&mut self) -> Result<u64> {
        let cycle = self.clock.tick();
        self.apply_events(cycle)?;
        self.simulations.run(&self.clock);
        Ok(cycle)
    }

    fn apply_events(&mut self, cycle: u64) -> Result<()> {
        let due: Vec<ScheduledEvent> = self
            .config
            .events
            .iter()
            .filter(|event| event.cycle == cycle)
            .cloned()
            .collect();
        for event in due {
            self.set_state(&event.group, event.state)?;
        }
        Ok(())
    }

    /// Run the configured number of cycles, logging watched states.
    pub fn run(&mut self) -> Result<()> {
        for _ in 0..self.config.cycles {
            let cycle = self.step()?;
            let watched = self.watched_states();
            info!(cycle, states = %format_states(&watched), "cycle complete");
        }
        Ok(())
    }

    /// `(id, state)` of every group in evaluation order.
    pub fn states(&self) -> Vec<(String, Option<bool>)> {
        self.context
            .ordered_groups
            .iter()
            .filter_map(|group| {
                let id = self.group_id(*group)?;
                let state = self.simulations.state(*group).ok()?;
                Some((id.to_string(), state))
            })
            .collect()
    }

    fn watched_states(&self) -> Vec<(String, Option<bool>)> {
        let states = self.states();
        if self.config.watch.is_empty() {
            return states;
        }
        states
            .into_iter()
            .filter(|(id, _)| self.config.watch.contains(id))
            .collect()
    }

    fn resolve(&self, id: &str) -> Result<ShapeId> {
        self.loaded
            .group(id)
            .ok_or_else(|| RunError::UnknownGroup(id.to_string()))
    }

    fn group_id(&self, group: ShapeId) -> Option<&str> {
        self.loaded
            .groups
            .iter()
            .find(|(_, shape)| **shape == group)
            .map(|(id, _)| id.as_str())
    }
}

/// `id=1 id=0 id=?`
pub fn format_states(states: &[(String, Option<bool>)]) -> String {
    states
        .iter()
        .map(|(id, state)| format!("{id}={}", format_state(*state)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_state(state: Option<bool>) -> &'static str {
    match state {
        Some(true) => "1",
        Some(false) => "0",
        None => "?",
    }
}
