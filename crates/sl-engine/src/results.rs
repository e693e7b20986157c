//! Per-node simulation results.

use serde::Serialize;
use sl_hydrograph::Hydrograph;
use std::collections::BTreeMap;

/// Pond-only summary figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PondSummary {
    pub peak_inflow_cfs: f64,
    pub peak_stage_ft: f64,
    pub peak_storage_cuft: f64,
}

/// Outcome for one node under one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeResult {
    pub node_id: String,
    pub node_name: String,
    /// Lowercase node kind label (matches the schema tag).
    pub kind: &'static str,
    pub outflow: Hydrograph,
    pub peak_outflow_cfs: f64,
    pub time_of_peak_hr: f64,
    /// Outflow volume, acre-feet.
    pub volume_acft: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pond: Option<PondSummary>,
}

impl NodeResult {
    /// A zero-valued result for a node that received nothing routable.
    pub(crate) fn inert(node_id: &str, node_name: &str, kind: &'static str) -> Self {
        Self {
            node_id: node_id.to_string(),
            node_name: node_name.to_string(),
            kind,
            outflow: Hydrograph::empty(),
            peak_outflow_cfs: 0.0,
            time_of_peak_hr: 0.0,
            volume_acft: 0.0,
            pond: None,
        }
    }
}

/// All node results for one (project, event) run, keyed by node id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub event_id: String,
    pub results: BTreeMap<String, NodeResult>,
}

impl SimulationOutcome {
    pub fn node(&self, id: &str) -> Option<&NodeResult> {
        self.results.get(id)
    }
}
