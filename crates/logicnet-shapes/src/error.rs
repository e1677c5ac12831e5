//! Diagram document errors

use thiserror::Error;

/// Result type for document loading.
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Errors raised while loading or building a diagram document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read the document file.
    #[error("failed to read diagram document: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the document YAML.
    #[error("failed to parse diagram YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Two shapes or connectors share an id.
    #[error("duplicate id '{0}'")]
    DuplicateId(String),

    /// A wire end names a connector or junction that does not exist.
    #[error("unknown point reference '{0}'")]
    UnknownPoint(String),

    /// A `parent` names something that is not a group in the document.
    #[error("'{shape}' refers to unknown parent group '{parent}'")]
    UnknownParent { shape: String, parent: String },

    /// Following `parent` links from a group leads back to a group already
    /// on the chain.
    #[error("group '{0}' is its own ancestor")]
    ParentCycle(String),
}
