//! Simulation errors

use thiserror::Error;

use logicnet_shapes::ShapeId;

/// Simulation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Simulation errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("no simulation registered for '{key}' (group {group})")]
    UnsupportedSimulationType { group: ShapeId, key: String },

    #[error("group {0} has no simulation instance")]
    UnknownGroup(ShapeId),

    #[error("graph extraction failed: {0}")]
    Graph(#[from] logicnet_graph::Error),
}
