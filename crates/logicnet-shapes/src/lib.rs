//! Diagram shape model for logicnet.
//!
//! A [`Diagram`] owns two arenas: points and shapes. Every point belongs to
//! exactly one owning shape, and shapes refer to points by [`PointId`]. A wire
//! that is drawn onto a group connector does not copy the connector, it
//! references the connector's id as its endpoint; this shared identity is what
//! the graph extraction in `logicnet-graph` follows.
//!
//! # Contents
//!
//! - [`types`] - identifiers, point state flags, pin roles and styles
//! - [`diagram`] - the arenas and builder methods
//! - [`document`] - YAML diagram documents for files and tests

pub mod diagram;
pub mod document;
pub mod error;
pub mod types;

pub use diagram::{Diagram, Endpoint, Group, GroupRef, Point, Shape, ShapeKind};
pub use document::{DiagramDocument, LoadedDiagram};
pub use error::{DocumentError, DocumentResult};
pub use types::*;
