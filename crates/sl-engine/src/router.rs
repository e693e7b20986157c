//! The system router: topological traversal of the drainage network.

use rayon::prelude::*;
use sl_hydrograph::{algebra, Hydrograph};
use sl_hydraulics::{route_pond, route_reach};
use sl_hydrology::runoff_hydrograph;
use sl_project::{
    incoming_map, topological_sort, NodeDef, NodeKindDef, ProjectError, ProjectDef,
    RainfallEventDef,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::compile::{build_pond, build_reach, build_subcatchment};
use crate::error::{EngineError, EngineResult};
use crate::results::{NodeResult, PondSummary, SimulationOutcome};

/// Run one rainfall event through the whole network.
///
/// Nodes are visited in topological order; every node's result is final
/// before any downstream node is touched. The project is never mutated.
pub fn run_simulation(project: &ProjectDef, event_id: &str) -> EngineResult<SimulationOutcome> {
    let event = project
        .events
        .iter()
        .find(|e| e.id == event_id)
        .ok_or_else(|| ProjectError::UnknownEvent {
            id: event_id.to_string(),
        })?;

    let order = topological_sort(&project.nodes, &project.links)?;
    let node_index: BTreeMap<&str, &NodeDef> = project
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n))
        .collect();
    let incoming = incoming_map(&project.links);

    let mut results: BTreeMap<String, NodeResult> = BTreeMap::new();

    for node_id in &order {
        let node = node_index[node_id.as_str()];

        let upstream: Vec<&Hydrograph> = incoming
            .get(node_id.as_str())
            .map(|sources| {
                sources
                    .iter()
                    .filter_map(|id| results.get(*id))
                    .map(|r| &r.outflow)
                    .collect()
            })
            .unwrap_or_default();
        let inflow = algebra::sum(&upstream);

        let result = route_node(node, event, &inflow)?;
        debug!(
            node = %node.id,
            kind = result.kind,
            peak_cfs = result.peak_outflow_cfs,
            "routed node"
        );
        results.insert(node.id.clone(), result);
    }

    info!(
        event = %event.id,
        nodes = results.len(),
        "simulation complete"
    );
    Ok(SimulationOutcome {
        event_id: event.id.clone(),
        results,
    })
}

/// Run every event in the project, one thread per event.
///
/// A simulation is a pure function of its arguments; events share nothing
/// mutable.
pub fn run_all_events(project: &ProjectDef) -> EngineResult<Vec<SimulationOutcome>> {
    if project.events.is_empty() {
        return Err(ProjectError::NoEvents.into());
    }
    project
        .events
        .par_iter()
        .map(|event| run_simulation(project, &event.id))
        .collect()
}

fn route_node(
    node: &NodeDef,
    event: &RainfallEventDef,
    inflow: &Hydrograph,
) -> EngineResult<NodeResult> {
    let kind = node.kind.label();
    match &node.kind {
        NodeKindDef::Subcatchment(def) => {
            let subcatchment = build_subcatchment(def);
            let computed =
                runoff_hydrograph(&subcatchment, event.storm_type, event.total_depth_in, None)
                    .map_err(|e| EngineError::hydrology(&node.id, e))?;

            // Upstream flow is added on top of the generated runoff; the
            // reported volume is integrated from the combined series.
            let (outflow, volume_acft) = if inflow.is_empty() {
                (
                    computed.runoff.hydrograph.clone(),
                    computed.runoff.volume_acft,
                )
            } else {
                let combined = algebra::sum(&[&computed.runoff.hydrograph, inflow]);
                let volume = combined.volume_acft();
                (combined, volume)
            };

            Ok(NodeResult {
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                kind,
                peak_outflow_cfs: outflow.peak_flow_cfs(),
                time_of_peak_hr: outflow.time_of_peak_hr(),
                volume_acft,
                outflow,
                pond: None,
            })
        }
        NodeKindDef::Pond(def) => {
            if inflow.len() < 2 {
                return Ok(NodeResult::inert(&node.id, &node.name, kind));
            }
            let pond = build_pond(&node.id, def)?;
            let routed =
                route_pond(&pond, inflow).map_err(|e| EngineError::hydraulics(&node.id, e))?;
            Ok(NodeResult {
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                kind,
                peak_outflow_cfs: routed.peak_outflow_cfs,
                time_of_peak_hr: routed.time_of_peak_hr,
                volume_acft: routed.outflow.volume_acft(),
                outflow: routed.outflow,
                pond: Some(PondSummary {
                    peak_inflow_cfs: routed.peak_inflow_cfs,
                    peak_stage_ft: routed.peak_stage_ft,
                    peak_storage_cuft: routed.peak_storage_cuft,
                }),
            })
        }
        NodeKindDef::Reach(def) => {
            if inflow.len() < 2 {
                return Ok(NodeResult::inert(&node.id, &node.name, kind));
            }
            let reach = build_reach(def);
            let routed =
                route_reach(&reach, inflow).map_err(|e| EngineError::hydraulics(&node.id, e))?;
            Ok(NodeResult {
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                kind,
                peak_outflow_cfs: routed.peak_outflow_cfs,
                time_of_peak_hr: routed.time_of_peak_hr,
                volume_acft: routed.outflow.volume_acft(),
                outflow: routed.outflow,
                pond: None,
            })
        }
        NodeKindDef::Junction => Ok(NodeResult {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            kind,
            peak_outflow_cfs: inflow.peak_flow_cfs(),
            time_of_peak_hr: inflow.time_of_peak_hr(),
            volume_acft: inflow.volume_acft(),
            outflow: inflow.clone(),
            pond: None,
        }),
    }
}
