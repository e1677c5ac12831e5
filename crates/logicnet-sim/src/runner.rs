//! Simulation instances and stepping.

use indexmap::IndexMap;
use tracing::{instrument, trace};

use logicnet_shapes::ShapeId;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::simulation::{BoolInput, BoolSimulation, SimulationId};

/// One group's simulation and the instances driving its inputs.
#[derive(Debug)]
pub struct SimulationInstance {
    pub group: ShapeId,
    pub name: String,
    pub simulation: Box<dyn BoolSimulation>,
    pub inputs: Vec<BoolInput>,
    /// Number of input slots, wired or not.
    pub slots: usize,
}

impl SimulationInstance {
    pub fn new(group: ShapeId, name: impl Into<String>, simulation: Box<dyn BoolSimulation>) -> Self {
        Self {
            group,
            name: name.into(),
            simulation,
            inputs: Vec::new(),
            slots: 0,
        }
    }
}

/// The simulations created for one graph context, stored in evaluation
/// order.
#[derive(Debug, Default)]
pub struct SimulationSet {
    instances: Vec<SimulationInstance>,
    by_group: IndexMap<ShapeId, SimulationId>,
}

impl SimulationSet {
    pub(crate) fn push(&mut self, instance: SimulationInstance) -> SimulationId {
        let id = SimulationId(self.instances.len());
        self.by_group.insert(instance.group, id);
        self.instances.push(instance);
        id
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Simulation created for `group`, if any.
    pub fn id(&self, group: ShapeId) -> Option<SimulationId> {
        self.by_group.get(&group).copied()
    }

    /// # Panics
    ///
    /// If `id` does not belong to this set.
    pub fn instance(&self, id: SimulationId) -> &SimulationInstance {
        &self.instances[id.0]
    }

    pub(crate) fn instance_mut(&mut self, id: SimulationId) -> &mut SimulationInstance {
        &mut self.instances[id.0]
    }

    /// Instances in evaluation order.
    pub fn instances(&self) -> impl Iterator<Item = &SimulationInstance> {
        self.instances.iter()
    }

    pub fn inputs(&self, group: ShapeId) -> Option<&[BoolInput]> {
        self.id(group)
            .map(|id| self.instances[id.0].inputs.as_slice())
    }

    /// Current output of the simulation for `group`.
    pub fn state(&self, group: ShapeId) -> Result<Option<bool>> {
        let id = self.id(group).ok_or(Error::UnknownGroup(group))?;
        Ok(self.instances[id.0].simulation.state())
    }

    /// Force the output of the simulation for `group`.
    pub fn set_state(&mut self, group: ShapeId, state: Option<bool>) -> Result<()> {
        let id = self.id(group).ok_or(Error::UnknownGroup(group))?;
        self.instances[id.0].simulation.set_state(state);
        Ok(())
    }

    /// Step every simulation once, in evaluation order.
    ///
    /// Each simulation sees the states its drivers hold at the moment it
    /// runs, so a driver stepped earlier in the same cycle is already
    /// updated. Several drivers on one slot combine as a wired OR, and an
    /// unwired slot reads low.
    #[instrument(skip_all, fields(cycle = clock.cycle()))]
    pub fn run(&mut self, clock: &dyn Clock) {
        for index in 0..self.instances.len() {
            let signals = self.signals(&self.instances[index]);

            let instance = &mut self.instances[index];
            instance.simulation.run(&signals, clock);
            trace!(
                group = %instance.group,
                name = %instance.name,
                ?signals,
                state = ?instance.simulation.state(),
                "simulation stepped"
            );
        }
    }

    fn signals(&self, instance: &SimulationInstance) -> Vec<Option<bool>> {
        let slots = instance
            .inputs
            .iter()
            .map(|input| input.slot + 1)
            .max()
            .unwrap_or(0)
            .max(instance.slots);
        let mut signals: Vec<Option<Option<bool>>> = vec![None; slots];

        for input in &instance.inputs {
            let driver = self.instances[input.simulation.0].simulation.state();
            let signal = input.signal(driver);
            let slot = &mut signals[input.slot];
            *slot = Some(match *slot {
                None => signal,
                Some(previous) => wired_or(previous, signal),
            });
        }

        signals
            .into_iter()
            .map(|slot| slot.unwrap_or(Some(false)))
            .collect()
    }
}

/// High wins; otherwise any undefined driver leaves the slot undefined.
fn wired_or(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}
