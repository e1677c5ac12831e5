//! Simulation traits and input wiring.

use std::fmt;

use logicnet_shapes::GroupRef;

use crate::clock::Clock;

/// Index of a simulation instance within its [`SimulationSet`](crate::SimulationSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimulationId(pub usize);

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sim{}", self.0)
    }
}

/// One input of a simulation: the instance driving it, whether the wire in
/// between inverts the signal, and the input slot it feeds.
///
/// Slots number the group's non-output connectors in connector order, so
/// an unwired connector still owns its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolInput {
    pub simulation: SimulationId,
    pub is_inverted: bool,
    pub slot: usize,
}

impl BoolInput {
    /// An input feeding slot 0.
    pub fn new(simulation: SimulationId, is_inverted: bool) -> Self {
        Self {
            simulation,
            is_inverted,
            slot: 0,
        }
    }

    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }

    /// The signal seen by the consumer for a given driver state.
    pub fn signal(&self, driver: Option<bool>) -> Option<bool> {
        driver.map(|value| value != self.is_inverted)
    }
}

/// A stateful three-valued Boolean element. `None` is an undefined signal.
pub trait BoolSimulation: fmt::Debug {
    /// Current output.
    fn state(&self) -> Option<bool>;

    /// Force the output, e.g. to flip a switch.
    fn set_state(&mut self, state: Option<bool>);

    /// Advance one cycle given one signal per input slot. An unwired slot
    /// reads `Some(false)`.
    fn run(&mut self, inputs: &[Option<bool>], clock: &dyn Clock);
}

/// A simulation with a type key, constructible from its group.
pub trait SimulationType: BoolSimulation + Sized + 'static {
    /// Group name this simulation is registered under.
    const KEY: &'static str;

    fn create(group: &GroupRef<'_>) -> Self;
}
