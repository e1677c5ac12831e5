//! Clocked Boolean simulation of logic networks.
//!
//! A [`SimulationRegistry`] maps group names to simulation factories. Given a
//! [`GraphContext`](logicnet_graph::GraphContext) it creates one simulation
//! per group, wires each input-typed connector to the simulations driving
//! it, and returns a [`SimulationSet`] that the caller steps once per
//! [`Clock`] tick.
//!
//! Simulations are three-valued: `None` is an undefined signal.

pub mod builtins;
pub mod clock;
pub mod error;
pub mod registry;
pub mod runner;
pub mod simulation;

pub use clock::{Clock, SimulationClock, DEFAULT_RESOLUTION_MS};
pub use error::{Error, Result};
pub use registry::{SimulationFactory, SimulationRegistry};
pub use runner::{SimulationInstance, SimulationSet};
pub use simulation::{BoolInput, BoolSimulation, SimulationId, SimulationType};
