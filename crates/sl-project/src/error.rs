//! Project-level error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Duplicate node id '{id}'")]
    DuplicateNodeId { id: String },

    #[error("Link '{link_id}' references unknown node '{node_id}'")]
    UnresolvedEndpoint { link_id: String, node_id: String },

    #[error("Drainage network contains a cycle through {nodes:?}")]
    Cycle { nodes: Vec<String> },

    #[error("Unknown rainfall event '{id}'")]
    UnknownEvent { id: String },

    #[error("Project defines no rainfall events")]
    NoEvents,

    #[error("Failed to read project file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse project JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
