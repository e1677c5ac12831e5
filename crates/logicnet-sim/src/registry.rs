//! Simulation registry.
//!
//! Maps group names to factories. A registry is an ordinary value owned by
//! the caller; there is no process-wide table.
//!
//! # Example
//!
//! ```ignore
//! let registry = SimulationRegistry::with_builtins();
//! let context = GraphContext::create(&diagram)?;
//! let mut simulations = registry.create(&diagram, &context)?;
//! simulations.run(&clock);
//! ```

use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

use logicnet_graph::GraphContext;
use logicnet_shapes::{Diagram, GroupRef, PinType};

use crate::builtins;
use crate::error::{Error, Result};
use crate::runner::{SimulationInstance, SimulationSet};
use crate::simulation::{BoolInput, BoolSimulation, SimulationId, SimulationType};

/// Builds a simulation for a group.
pub type SimulationFactory = Box<dyn Fn(&GroupRef<'_>) -> Box<dyn BoolSimulation>>;

/// Factories keyed by group name.
#[derive(Default)]
pub struct SimulationRegistry {
    factories: IndexMap<String, SimulationFactory>,
}

impl SimulationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in simulation.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register_all(&mut registry);
        registry
    }

    /// Register a factory under `key`. Returns `false` and leaves the
    /// registry untouched if the key is taken.
    pub fn register(&mut self, key: impl Into<String>, factory: SimulationFactory) -> bool {
        let key = key.into();
        if self.factories.contains_key(&key) {
            warn!(%key, "simulation already registered");
            return false;
        }
        debug!(%key, "simulation registered");
        self.factories.insert(key, factory);
        true
    }

    /// Register `S` under [`SimulationType::KEY`].
    pub fn register_type<S: SimulationType>(&mut self) -> bool {
        self.register(S::KEY, Box::new(instantiate::<S>))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Instantiate and wire one simulation per ordered group.
    ///
    /// Every connector that is not output-typed is an input slot. An
    /// input-typed connector receives one [`BoolInput`] per output-typed
    /// point in its dependency set; other slots stay unwired.
    #[instrument(skip_all, fields(groups = context.ordered_groups.len()))]
    pub fn create(&self, diagram: &Diagram, context: &GraphContext) -> Result<SimulationSet> {
        let mut set = SimulationSet::default();

        for id in &context.ordered_groups {
            let Some(group) = diagram.group(*id) else {
                continue;
            };
            let factory = self.factories.get(group.name).ok_or_else(|| {
                Error::UnsupportedSimulationType {
                    group: *id,
                    key: group.name.to_string(),
                }
            })?;
            set.push(SimulationInstance::new(*id, group.name, factory(&group)));
        }

        for index in 0..set.len() {
            let id = SimulationId(index);
            let Some(group) = diagram.group(set.instance(id).group) else {
                continue;
            };
            let (inputs, slots) = wire_inputs(diagram, context, &group, &set);
            let instance = set.instance_mut(id);
            instance.inputs = inputs;
            instance.slots = slots;
        }

        info!(simulations = set.len(), "simulations created");
        Ok(set)
    }

    /// Extract the logic network of `diagram` and instantiate it.
    pub fn build(&self, diagram: &Diagram) -> Result<(GraphContext, SimulationSet)> {
        let context = GraphContext::create(diagram)?;
        let set = self.create(diagram, &context)?;
        Ok((context, set))
    }
}

impl std::fmt::Debug for SimulationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationRegistry")
            .field("keys", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn instantiate<S: SimulationType>(group: &GroupRef<'_>) -> Box<dyn BoolSimulation> {
    Box::new(S::create(group))
}

/// Inputs of `group` and its slot count.
fn wire_inputs(
    diagram: &Diagram,
    context: &GraphContext,
    group: &GroupRef<'_>,
    set: &SimulationSet,
) -> (Vec<BoolInput>, usize) {
    let mut inputs = Vec::new();
    let mut slots = 0;

    for connector in group.connectors() {
        let role = context.pin_type(diagram, *connector);
        if role == PinType::Output {
            continue;
        }
        let slot = slots;
        slots += 1;
        if role != PinType::Input {
            continue;
        }
        let Some(pins) = context.dependencies.get(connector) else {
            continue;
        };
        for pin in pins {
            if context.pin_type(diagram, pin.point) != PinType::Output {
                continue;
            }
            if let Some(owner) = diagram.owner_group(pin.point)
                && let Some(driver) = set.id(owner)
            {
                inputs.push(BoolInput::new(driver, pin.inverted).with_slot(slot));
            }
        }
    }

    (inputs, slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use logicnet_shapes::ShapeStyle;

    #[derive(Debug)]
    struct Constant(Option<bool>);

    impl BoolSimulation for Constant {
        fn state(&self) -> Option<bool> {
            self.0
        }

        fn set_state(&mut self, state: Option<bool>) {
            self.0 = state;
        }

        fn run(&mut self, _inputs: &[Option<bool>], _clock: &dyn Clock) {}
    }

    impl SimulationType for Constant {
        const KEY: &'static str = "CONST";

        fn create(_group: &GroupRef<'_>) -> Self {
            Self(Some(true))
        }
    }

    #[test]
    fn test_register_never_overwrites() {
        let mut registry = SimulationRegistry::new();
        assert!(registry.register_type::<Constant>());
        assert!(!registry.register_type::<Constant>());
        assert!(!registry.register("CONST", Box::new(|_: &GroupRef<'_>| -> Box<dyn BoolSimulation> { Box::new(Constant(None)) })));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["CONST"]);
    }

    #[test]
    fn test_builtins_registered() {
        let registry = SimulationRegistry::with_builtins();
        for key in ["SWITCH", "NOT", "AND", "TIMER-ON", "SR-RESET"] {
            assert!(registry.contains(key), "{key} missing");
        }
    }

    #[test]
    fn test_unsupported_type() {
        let mut diagram = Diagram::new();
        let lamp = diagram.add_group("LAMP");
        diagram.add_connector(lamp, 0.0, 0.0, PinType::Input);
        let context = GraphContext::create(&diagram).unwrap();

        let err = SimulationRegistry::with_builtins()
            .create(&diagram, &context)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedSimulationType { group, ref key } if group == lamp && key == "LAMP"));
    }

    #[test]
    fn test_switch_wired_into_not() {
        let mut diagram = Diagram::new();
        let not = diagram.add_group("NOT");
        let input = diagram.add_connector(not, 1.0, 0.0, PinType::Input);
        diagram.add_connector(not, 2.0, 0.0, PinType::Output);
        let switch = diagram.add_group("SWITCH");
        let q = diagram.add_connector(switch, 0.0, 0.0, PinType::Output);
        diagram.add_line(ShapeStyle::logic_wire(), q, input);

        let (_, set) = SimulationRegistry::with_builtins().build(&diagram).unwrap();
        let switch_id = set.id(switch).unwrap();
        assert_eq!(switch_id, SimulationId(0));
        assert_eq!(set.inputs(not).unwrap(), &[BoolInput::new(switch_id, false)]);
        assert!(set.inputs(switch).unwrap().is_empty());
        assert_eq!(set.instance(set.id(not).unwrap()).slots, 1);
        assert_eq!(set.instance(switch_id).slots, 0);
    }

    #[test]
    fn test_inverted_and_fan_in_inputs() {
        let mut diagram = Diagram::new();
        let a = diagram.add_group("SWITCH");
        let a_q = diagram.add_connector(a, 0.0, 0.0, PinType::Output);
        let b = diagram.add_group("SWITCH");
        let b_q = diagram.add_connector(b, 0.0, 1.0, PinType::Output);
        let and = diagram.add_group("AND");
        let x = diagram.add_connector(and, 1.0, 0.0, PinType::Input);
        let y = diagram.add_connector(and, 1.0, 1.0, PinType::Input);
        diagram.add_connector(and, 2.0, 0.5, PinType::Output);
        diagram.add_line(ShapeStyle::logic_wire(), a_q, x);
        diagram.add_line(ShapeStyle::inverted_logic_wire(), b_q, y);

        let (_, set) = SimulationRegistry::with_builtins().build(&diagram).unwrap();
        let inputs = set.inputs(and).unwrap();
        assert_eq!(
            inputs,
            &[
                BoolInput::new(set.id(a).unwrap(), false),
                BoolInput::new(set.id(b).unwrap(), true).with_slot(1),
            ]
        );
    }

    #[test]
    fn test_unwired_connector_keeps_its_slot() {
        let mut diagram = Diagram::new();
        let reset = diagram.add_group("SWITCH");
        let q = diagram.add_connector(reset, 0.0, 0.0, PinType::Output);
        let latch = diagram.add_group("SR-SET");
        diagram.add_connector(latch, 1.0, 0.0, PinType::Input);
        let r = diagram.add_connector(latch, 1.0, 1.0, PinType::Input);
        diagram.add_connector(latch, 2.0, 0.0, PinType::Output);
        diagram.add_line(ShapeStyle::logic_wire(), q, r);

        let (_, set) = SimulationRegistry::with_builtins().build(&diagram).unwrap();
        let driver = set.id(reset).unwrap();
        assert_eq!(set.inputs(latch).unwrap(), &[BoolInput::new(driver, false).with_slot(1)]);
        assert_eq!(set.instance(set.id(latch).unwrap()).slots, 2);
    }
}
