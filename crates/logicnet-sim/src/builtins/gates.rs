//! Combinational gates.

use logicnet_shapes::GroupRef;

use super::defined;
use crate::clock::Clock;
use crate::simulation::{BoolSimulation, SimulationType};

macro_rules! gate {
    ($(#[$doc:meta])* $name:ident, $key:literal, |$values:ident| $eval:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name {
            state: Option<bool>,
        }

        impl BoolSimulation for $name {
            fn state(&self) -> Option<bool> {
                self.state
            }

            fn set_state(&mut self, state: Option<bool>) {
                self.state = state;
            }

            fn run(&mut self, inputs: &[Option<bool>], _clock: &dyn Clock) {
                self.state = defined(inputs).map(|$values| $eval);
            }
        }

        impl SimulationType for $name {
            const KEY: &'static str = $key;

            fn create(_group: &GroupRef<'_>) -> Self {
                Self::default()
            }
        }
    };
}

gate!(
    /// Copies its first input.
    Buffer, "BUFFER", |values| values[0]
);
gate!(
    /// Negates its first input.
    Not, "NOT", |values| !values[0]
);
gate!(And, "AND", |values| values.iter().all(|v| *v));
gate!(Or, "OR", |values| values.iter().any(|v| *v));
gate!(
    /// True when an odd number of inputs is true.
    Xor, "XOR", |values| values.iter().filter(|v| **v).count() % 2 == 1
);
