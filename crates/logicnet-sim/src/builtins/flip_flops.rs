//! Set/reset flip-flops.
//!
//! The first input slot sets, the second resets. With both high the
//! dominant input wins; with both low the state is held. An undefined
//! input leaves the state unchanged, and an unwired slot reads low.

use logicnet_shapes::GroupRef;

use crate::clock::Clock;
use crate::simulation::{BoolSimulation, SimulationType};

fn step(state: Option<bool>, inputs: &[Option<bool>], set_wins: bool) -> Option<bool> {
    let set = inputs.first().copied().flatten();
    let reset = inputs.get(1).copied().flatten();
    match (set, reset) {
        (Some(true), Some(true)) => Some(set_wins),
        (Some(true), Some(false)) => Some(true),
        (Some(false), Some(true)) => Some(false),
        _ => state,
    }
}

/// Set wins when both inputs are high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetDominant {
    state: Option<bool>,
}

impl BoolSimulation for SetDominant {
    fn state(&self) -> Option<bool> {
        self.state
    }

    fn set_state(&mut self, state: Option<bool>) {
        self.state = state;
    }

    fn run(&mut self, inputs: &[Option<bool>], _clock: &dyn Clock) {
        self.state = step(self.state, inputs, true);
    }
}

impl SimulationType for SetDominant {
    const KEY: &'static str = "SR-SET";

    fn create(_group: &GroupRef<'_>) -> Self {
        Self { state: Some(false) }
    }
}

/// Reset wins when both inputs are high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetDominant {
    state: Option<bool>,
}

impl BoolSimulation for ResetDominant {
    fn state(&self) -> Option<bool> {
        self.state
    }

    fn set_state(&mut self, state: Option<bool>) {
        self.state = state;
    }

    fn run(&mut self, inputs: &[Option<bool>], _clock: &dyn Clock) {
        self.state = step(self.state, inputs, false);
    }
}

impl SimulationType for ResetDominant {
    const KEY: &'static str = "SR-RESET";

    fn create(_group: &GroupRef<'_>) -> Self {
        Self { state: Some(false) }
    }
}
