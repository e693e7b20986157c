//! Native project schema.
//!
//! Field names and tags match the project JSON format; numeric fields are
//! plain `f64` in the units their suffixes say. Variant payloads sit under
//! a `data` key next to the `type` tag.

use serde::{Deserialize, Serialize};
use sl_hydrology::{ShallowSurface, SoilGroup, StormType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
    #[serde(default)]
    pub events: Vec<RainfallEventDef>,
}

/// Diagram position; opaque to the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PositionDef {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: PositionDef,
    #[serde(flatten)]
    pub kind: NodeKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeKindDef {
    Subcatchment(SubcatchmentDef),
    Pond(PondDef),
    Reach(ReachDef),
    Junction,
}

impl NodeKindDef {
    /// Stable lowercase label, matching the JSON tag.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKindDef::Subcatchment(_) => "subcatchment",
            NodeKindDef::Pond(_) => "pond",
            NodeKindDef::Reach(_) => "reach",
            NodeKindDef::Junction => "junction",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SubcatchmentDef {
    #[serde(default)]
    pub sub_areas: Vec<SubAreaDef>,
    #[serde(default)]
    pub flow_segments: Vec<FlowSegmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tc_override_hr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cn_override: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubAreaDef {
    #[serde(default)]
    pub description: String,
    pub soil_group: SoilGroup,
    pub curve_number: f64,
    pub area_ac: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowSegmentDef {
    Sheet {
        manning_n: f64,
        length_ft: f64,
        slope: f64,
        two_year_rain_in: f64,
    },
    ShallowConcentrated {
        surface: ShallowSurface,
        length_ft: f64,
        slope: f64,
    },
    Channel {
        manning_n: f64,
        flow_area_sqft: f64,
        wetted_perimeter_ft: f64,
        slope: f64,
        length_ft: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PondDef {
    pub stage_storage: Vec<StagePointDef>,
    #[serde(default)]
    pub outlets: Vec<OutletDef>,
    pub initial_wse_ft: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StagePointDef {
    pub stage_ft: f64,
    pub storage_cuft: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutletDef {
    Orifice {
        cd: f64,
        diameter_ft: f64,
        center_elev_ft: f64,
    },
    Weir {
        kind: WeirKindDef,
        coefficient: f64,
        crest_length_ft: f64,
        crest_elev_ft: f64,
    },
    VNotch {
        coefficient: f64,
        notch_angle_deg: f64,
        crest_elev_ft: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeirKindDef {
    BroadCrested,
    SharpCrested,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReachDef {
    pub length_ft: f64,
    pub manning_n: f64,
    pub slope: f64,
    pub section: SectionDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionDef {
    Rectangular {
        width_ft: f64,
    },
    Trapezoidal {
        bottom_width_ft: f64,
        side_slope: f64,
    },
    Circular {
        diameter_ft: f64,
    },
}

/// A directed edge: flow leaves `from` and enters `to`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkDef {
    pub id: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainfallEventDef {
    pub id: String,
    pub label: String,
    #[serde(rename = "stormType")]
    pub storm_type: StormType,
    /// Total storm depth in inches.
    #[serde(rename = "totalDepth")]
    pub total_depth_in: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_tags_round_trip() {
        let node = NodeDef {
            id: "j1".into(),
            name: "Outlet".into(),
            position: PositionDef { x: 4.0, y: 2.0 },
            kind: NodeKindDef::Junction,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "junction");
        assert!(json.get("data").is_none());

        let back: NodeDef = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn subcatchment_payload_nests_under_data() {
        let node = NodeDef {
            id: "s1".into(),
            name: "North Basin".into(),
            position: PositionDef::default(),
            kind: NodeKindDef::Subcatchment(SubcatchmentDef {
                sub_areas: vec![SubAreaDef {
                    description: "lawn".into(),
                    soil_group: SoilGroup::B,
                    curve_number: 75.0,
                    area_ac: 12.0,
                }],
                flow_segments: vec![FlowSegmentDef::Sheet {
                    manning_n: 0.24,
                    length_ft: 150.0,
                    slope: 0.02,
                    two_year_rain_in: 3.6,
                }],
                tc_override_hr: None,
                cn_override: None,
            }),
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "subcatchment");
        assert_eq!(json["data"]["sub_areas"][0]["curve_number"], 75.0);
        assert_eq!(json["data"]["flow_segments"][0]["type"], "sheet");

        let back: NodeDef = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn event_keys_are_camel_case() {
        let event = RainfallEventDef {
            id: "e100".into(),
            label: "100-yr".into(),
            storm_type: StormType::II,
            total_depth_in: 8.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["stormType"], "II");
        assert_eq!(json["totalDepth"], 8.0);
    }

    #[test]
    fn storm_type_ia_spelling() {
        let event: RainfallEventDef = serde_json::from_value(serde_json::json!({
            "id": "e", "label": "l", "stormType": "IA", "totalDepth": 2.0
        }))
        .unwrap();
        assert_eq!(event.storm_type, StormType::Ia);
    }

    #[test]
    fn missing_optional_collections_default() {
        let project: ProjectDef = serde_json::from_str(
            r#"{"id": "p1", "name": "Empty"}"#,
        )
        .unwrap();
        assert!(project.nodes.is_empty());
        assert!(project.links.is_empty());
        assert!(project.events.is_empty());
        assert_eq!(project.description, "");
    }
}
