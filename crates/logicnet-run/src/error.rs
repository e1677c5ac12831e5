//! Runner errors

use std::path::PathBuf;

use thiserror::Error;

/// Runner result type
pub type Result<T> = std::result::Result<T, RunError>;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to load diagram: {0}")]
    Document(#[from] logicnet_shapes::DocumentError),

    #[error(transparent)]
    Graph(#[from] logicnet_graph::Error),

    #[error(transparent)]
    Simulation(#[from] logicnet_sim::Error),

    #[error("failed to read run config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse run config: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("run config refers to unknown group '{0}'")]
    UnknownGroup(String),
}
