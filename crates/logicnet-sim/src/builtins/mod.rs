//! Built-in simulations.
//!
//! | Key | Behaviour |
//! |-----|-----------|
//! | `SWITCH` | Signal source set from outside, starts `false` |
//! | `BUFFER`, `NOT` | Copy or negate the first slot |
//! | `AND`, `OR`, `XOR` | Combine all inputs; `XOR` is odd parity |
//! | `TIMER-ON`, `TIMER-OFF`, `TIMER-PULSE` | Delays driven by the `delay` group property, in seconds |
//! | `SR-SET`, `SR-RESET` | Set/reset flip-flops; first slot sets, second resets |
//!
//! Inputs arrive one per slot, in connector order. An unwired slot reads
//! low. An undefined input makes the output undefined, except where a
//! flip-flop holds its state.

mod flip_flops;
mod gates;
mod switch;
mod timers;

pub use flip_flops::{ResetDominant, SetDominant};
pub use gates::{And, Buffer, Not, Or, Xor};
pub use switch::Switch;
pub use timers::{OffDelay, OnDelay, Pulse};

use crate::registry::SimulationRegistry;

pub(crate) fn register_all(registry: &mut SimulationRegistry) {
    registry.register_type::<Switch>();
    registry.register_type::<Buffer>();
    registry.register_type::<Not>();
    registry.register_type::<And>();
    registry.register_type::<Or>();
    registry.register_type::<Xor>();
    registry.register_type::<OnDelay>();
    registry.register_type::<OffDelay>();
    registry.register_type::<Pulse>();
    registry.register_type::<SetDominant>();
    registry.register_type::<ResetDominant>();
}

/// All inputs, or `None` if there are none or any is undefined.
fn defined(inputs: &[Option<bool>]) -> Option<Vec<bool>> {
    if inputs.is_empty() {
        return None;
    }
    inputs.iter().copied().collect()
}
