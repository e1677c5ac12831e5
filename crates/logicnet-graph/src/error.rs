//! Graph extraction errors.
//!
//! Every error is fatal for the `GraphContext::create` call that raised it;
//! no partial context is ever returned.
//!
//! # Error Categories
//!
//! - **Shape errors**: [`Error::InvalidWireType`]
//! - **Wiring errors**: [`Error::ConflictingPinConnection`], [`Error::UnresolvablePinTypes`]
//! - **Ordering errors**: [`Error::DependencyCycle`]

use thiserror::Error;

use logicnet_shapes::{PointId, ShapeId};

/// Graph result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while extracting a logic network.
#[derive(Debug, Error)]
pub enum Error {
    /// A shape used as a wire is not a line, cubic Bezier or quadratic Bezier.
    #[error("shape {shape} is a {kind}; only line, cubic-bezier and quadratic-bezier shapes can be wires")]
    InvalidWireType {
        shape: ShapeId,
        kind: &'static str,
    },

    /// A connector is wired, directly or through junctions, to both input
    /// and output typed points.
    #[error("connector {point} of group '{group}' is connected to both inputs and outputs")]
    ConflictingPinConnection {
        point: PointId,
        group: String,
    },

    /// Role inference stopped making progress with connectors still untyped.
    #[error("unable to resolve pin types for {} connector(s): {points:?}", points.len())]
    UnresolvablePinTypes {
        points: Vec<PointId>,
    },

    /// The group evaluation order contains a cycle.
    #[error("dependency cycle between groups: {}", groups.join(" -> "))]
    DependencyCycle {
        /// Group names along the cycle, first name repeated at the end.
        groups: Vec<String>,
        shapes: Vec<ShapeId>,
    },
}
