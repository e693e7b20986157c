//! Error types for the engine layer.
//!
//! Wraps the backend crate errors into one interface for the CLI and other
//! front ends.

use sl_hydraulics::HydraulicsError;
use sl_hydrology::HydrologyError;
use sl_project::ProjectError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Hydrology error at node '{node_id}': {source}")]
    Hydrology {
        node_id: String,
        source: HydrologyError,
    },

    #[error("Hydraulics error at node '{node_id}': {source}")]
    Hydraulics {
        node_id: String,
        source: HydraulicsError,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn hydrology(node_id: &str, source: HydrologyError) -> Self {
        EngineError::Hydrology {
            node_id: node_id.to_string(),
            source,
        }
    }

    pub(crate) fn hydraulics(node_id: &str, source: HydraulicsError) -> Self {
        EngineError::Hydraulics {
            node_id: node_id.to_string(),
            source,
        }
    }
}
