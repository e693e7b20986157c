//! Advisory project validation.
//!
//! Returns human-readable findings for pre-flight display. Callers may still
//! run partial simulations; the engine independently treats unknown events,
//! cycles and unusable subcatchments as fatal.

use crate::graph::topological_sort;
use crate::schema::{NodeKindDef, ProjectDef};
use std::collections::HashSet;

/// Check a project and report everything wrong with it.
pub fn validate_project(project: &ProjectDef) -> Vec<String> {
    let mut findings = Vec::new();

    let mut seen = HashSet::new();
    for node in &project.nodes {
        if !seen.insert(node.id.as_str()) {
            findings.push(format!("Duplicate node id '{}'", node.id));
        }
    }

    for link in &project.links {
        for endpoint in [&link.from, &link.to] {
            if !seen.contains(endpoint.as_str()) {
                findings.push(format!(
                    "Link '{}' references unknown node '{}'",
                    link.id, endpoint
                ));
            }
        }
    }

    // Only look for cycles when the id space is sound; otherwise the sort
    // would re-report the problems above.
    if findings.is_empty() {
        if let Err(err) = topological_sort(&project.nodes, &project.links) {
            findings.push(err.to_string());
        }
    }

    for node in &project.nodes {
        if let NodeKindDef::Subcatchment(sub) = &node.kind {
            if sub.sub_areas.is_empty() {
                findings.push(format!(
                    "Subcatchment '{}' has no sub-areas",
                    node.name
                ));
            }
            if sub.flow_segments.is_empty() && sub.tc_override_hr.is_none() {
                findings.push(format!(
                    "Subcatchment '{}' has neither flow segments nor a Tc override",
                    node.name
                ));
            }
        }
    }

    if project.events.is_empty() {
        findings.push("Project defines no rainfall events".to_string());
    }
    for event in &project.events {
        if !(event.total_depth_in > 0.0) {
            findings.push(format!(
                "Event '{}' has non-positive total depth {}",
                event.id, event.total_depth_in
            ));
        }
    }

    findings
}
