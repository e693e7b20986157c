//! sl-project: the native project record, validation and DAG ordering.
//!
//! The schema types here mirror the project JSON one-to-one; they carry
//! plain numbers and are compiled into typed runtime structures by the
//! engine before simulation.

pub mod error;
pub mod graph;
pub mod schema;
pub mod validate;

pub use error::ProjectError;
pub use graph::{incoming_map, topological_sort};
pub use schema::*;
pub use validate::validate_project;

use std::path::Path;

/// Parse a project from its JSON text.
pub fn project_from_json(text: &str) -> Result<ProjectDef, ProjectError> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a project to pretty JSON.
pub fn project_to_json(project: &ProjectDef) -> Result<String, ProjectError> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// Load a project file from disk.
pub fn load_project(path: &Path) -> Result<ProjectDef, ProjectError> {
    let text = std::fs::read_to_string(path)?;
    project_from_json(&text)
}
