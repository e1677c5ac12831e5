//! Logic network extraction.
//!
//! Turns a [`Diagram`](logicnet_shapes::Diagram) of groups, junctions and
//! wires into a [`GraphContext`]: who is connected to whom, what every
//! connector depends on, which role each connector plays, and the order in
//! which groups must be evaluated.
//!
//! # Pipeline
//!
//! 1. [`classify`] - pick out groups, standalone pins and logic wires
//! 2. [`connectivity`] - undirected adjacency between logic points
//! 3. [`dependencies`] - reachable typed points per connector, through junctions
//! 4. [`pin_types`] - fixed-point role inference
//! 5. [`ordering`] - driver-first group order via [`topology`]
//!
//! Every stage fails loudly: there is no partially built context.

pub mod classify;
pub mod connectivity;
pub mod context;
pub mod dependencies;
pub mod error;
pub mod ordering;
pub mod pin;
pub mod pin_types;
pub mod topology;


pub use classify::LogicShapes;
pub use context::GraphContext;
pub use error::{Error, Result};
pub use pin::{Pin, PinMap};
pub use topology::{topological_sort, CycleError};
