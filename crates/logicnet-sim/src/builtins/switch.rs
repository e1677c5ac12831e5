//! Manually operated signal source.
//!
//! A switch has no inputs. Its state only changes through
//! [`BoolSimulation::set_state`] and starts low.

use logicnet_shapes::GroupRef;

use crate::clock::Clock;
use crate::simulation::{BoolSimulation, SimulationType};

/// Holds whatever state it was last given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    state: Option<bool>,
}

impl BoolSimulation for Switch {
    fn state(&self) -> Option<bool> {
        self.state
    }

    fn set_state(&mut self, state: Option<bool>) {
        self.state = state;
    }

    fn run(&mut self, _inputs: &[Option<bool>], _clock: &dyn Clock) {}
}

impl SimulationType for Switch {
    const KEY: &'static str = "SWITCH";

    fn create(_group: &GroupRef<'_>) -> Self {
        Self { state: Some(false) }
    }
}
