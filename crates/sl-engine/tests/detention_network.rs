//! Network-level routing: a subcatchment draining through a detention pond
//! to an outlet junction under a Type II design storm.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use sl_engine::{run_simulation, EngineError};
use sl_hydrology::StormType;
use sl_project::{
    LinkDef, NodeDef, NodeKindDef, OutletDef, PondDef, PositionDef, ProjectDef, ProjectError,
    RainfallEventDef, SectionDef, StagePointDef, SubAreaDef, SubcatchmentDef, ReachDef,
    WeirKindDef,
};

fn subcatchment_node(id: &str, area_ac: f64, cn: f64, tc_hr: f64) -> NodeDef {
    NodeDef {
        id: id.into(),
        name: format!("Basin {id}"),
        position: PositionDef::default(),
        kind: NodeKindDef::Subcatchment(SubcatchmentDef {
            sub_areas: vec![SubAreaDef {
                description: "mixed cover".into(),
                soil_group: sl_hydrology::SoilGroup::C,
                curve_number: cn,
                area_ac,
            }],
            flow_segments: vec![],
            tc_override_hr: Some(tc_hr),
            cn_override: None,
        }),
    }
}

/// 100 x 50 ft prismatic pond, 10 ft deep, 1:1 side slopes, base at 100 ft:
/// V(d) = 5000 d + 150 d^2 + (4/3) d^3.
fn pond_node(id: &str) -> NodeDef {
    let stage_storage = (0..=10)
        .map(|i| {
            let d = i as f64;
            StagePointDef {
                stage_ft: 100.0 + d,
                storage_cuft: 5000.0 * d + 150.0 * d * d + 4.0 / 3.0 * d * d * d,
            }
        })
        .collect();
    NodeDef {
        id: id.into(),
        name: "Pond".into(),
        position: PositionDef::default(),
        kind: NodeKindDef::Pond(PondDef {
            stage_storage,
            outlets: vec![
                OutletDef::Orifice {
                    cd: 0.6,
                    diameter_ft: 1.0,
                    center_elev_ft: 100.5,
                },
                OutletDef::Weir {
                    kind: WeirKindDef::BroadCrested,
                    coefficient: 2.85,
                    crest_length_ft: 8.0,
                    crest_elev_ft: 106.0,
                },
            ],
            initial_wse_ft: 100.0,
        }),
    }
}

fn junction_node(id: &str) -> NodeDef {
    NodeDef {
        id: id.into(),
        name: "Outlet".into(),
        position: PositionDef::default(),
        kind: NodeKindDef::Junction,
    }
}

fn link(id: &str, from: &str, to: &str) -> LinkDef {
    LinkDef {
        id: id.into(),
        from: from.into(),
        to: to.into(),
    }
}

fn event(id: &str, depth_in: f64) -> RainfallEventDef {
    RainfallEventDef {
        id: id.into(),
        label: format!("{depth_in} in storm"),
        storm_type: StormType::II,
        total_depth_in: depth_in,
    }
}

fn detention_project() -> ProjectDef {
    ProjectDef {
        id: "detention".into(),
        name: "Detention test".into(),
        description: String::new(),
        nodes: vec![
            subcatchment_node("basin", 100.0, 70.0, 0.5),
            pond_node("pond"),
            junction_node("outlet"),
        ],
        links: vec![link("l1", "basin", "pond"), link("l2", "pond", "outlet")],
        events: vec![event("25yr", 6.0)],
    }
}

#[test]
fn pond_attenuates_between_basin_and_outlet() {
    let outcome = run_simulation(&detention_project(), "25yr").unwrap();
    assert_eq!(outcome.event_id, "25yr");

    let basin = outcome.node("basin").unwrap();
    let pond = outcome.node("pond").unwrap();
    let outlet = outcome.node("outlet").unwrap();

    assert!(basin.peak_outflow_cfs > 0.0);
    assert!(
        basin.peak_outflow_cfs > pond.peak_outflow_cfs,
        "pond must attenuate: basin {} vs pond {}",
        basin.peak_outflow_cfs,
        pond.peak_outflow_cfs
    );
    assert!(pond.peak_outflow_cfs > 0.0);

    // junction passes the pond outflow through unchanged
    assert_abs_diff_eq!(
        outlet.peak_outflow_cfs,
        pond.peak_outflow_cfs,
        epsilon = 0.05
    );
    assert_relative_eq!(outlet.volume_acft, pond.volume_acft, max_relative = 1e-9);

    // the pool rose but stayed inside the rating
    let summary = pond.pond.as_ref().unwrap();
    assert!(summary.peak_stage_ft > 100.0);
    assert!(summary.peak_stage_ft <= 110.0);
    assert_relative_eq!(summary.peak_inflow_cfs, basin.peak_outflow_cfs);

    // outflow volume cannot exceed what came in
    assert!(pond.volume_acft <= basin.volume_acft * 1.001);
}

#[test]
fn junction_sums_parallel_basins() {
    let project = ProjectDef {
        id: "confluence".into(),
        name: "Two basins".into(),
        description: String::new(),
        nodes: vec![
            subcatchment_node("a", 40.0, 80.0, 0.4),
            subcatchment_node("b", 25.0, 85.0, 0.7),
            junction_node("j"),
        ],
        links: vec![link("l1", "a", "j"), link("l2", "b", "j")],
        events: vec![event("storm", 4.0)],
    };
    let outcome = run_simulation(&project, "storm").unwrap();

    let a = outcome.node("a").unwrap();
    let b = outcome.node("b").unwrap();
    let j = outcome.node("j").unwrap();

    // the union-resample sum conserves volume exactly
    assert_relative_eq!(
        j.volume_acft,
        a.volume_acft + b.volume_acft,
        max_relative = 1e-9
    );
    // peaks do not generally align, so the junction peak is bounded
    assert!(j.peak_outflow_cfs <= a.peak_outflow_cfs + b.peak_outflow_cfs);
    assert!(j.peak_outflow_cfs >= a.peak_outflow_cfs.max(b.peak_outflow_cfs));
}

#[test]
fn subcatchment_adds_upstream_inflow() {
    let project = ProjectDef {
        id: "cascade".into(),
        name: "Basin into basin".into(),
        description: String::new(),
        nodes: vec![
            subcatchment_node("upper", 30.0, 80.0, 0.5),
            subcatchment_node("lower", 20.0, 80.0, 0.5),
        ],
        links: vec![link("l1", "upper", "lower")],
        events: vec![event("storm", 4.0)],
    };
    let outcome = run_simulation(&project, "storm").unwrap();
    let upper = outcome.node("upper").unwrap();
    let lower = outcome.node("lower").unwrap();

    // lower reports its own runoff plus everything from above
    assert!(lower.peak_outflow_cfs > upper.peak_outflow_cfs);
    assert_relative_eq!(
        lower.volume_acft,
        upper.volume_acft * (30.0 + 20.0) / 30.0,
        max_relative = 0.02
    );
}

#[test]
fn reach_translates_without_attenuation() {
    let project = ProjectDef {
        id: "channel".into(),
        name: "Basin through channel".into(),
        description: String::new(),
        nodes: vec![
            subcatchment_node("basin", 50.0, 78.0, 0.5),
            NodeDef {
                id: "swale".into(),
                name: "Swale".into(),
                position: PositionDef::default(),
                kind: NodeKindDef::Reach(ReachDef {
                    length_ft: 2400.0,
                    manning_n: 0.04,
                    slope: 0.003,
                    section: SectionDef::Trapezoidal {
                        bottom_width_ft: 4.0,
                        side_slope: 3.0,
                    },
                }),
            },
        ],
        links: vec![link("l1", "basin", "swale")],
        events: vec![event("storm", 5.0)],
    };
    let outcome = run_simulation(&project, "storm").unwrap();
    let basin = outcome.node("basin").unwrap();
    let swale = outcome.node("swale").unwrap();

    // pure translation: the peak survives, later in time
    assert_relative_eq!(swale.peak_outflow_cfs, basin.peak_outflow_cfs);
    assert!(swale.time_of_peak_hr > basin.time_of_peak_hr);
    // same sampling grid
    assert_eq!(swale.outflow.len(), basin.outflow.len());
}

#[test]
fn upstream_less_pond_and_reach_yield_inert_results() {
    let mut project = detention_project();
    project.links.clear();
    let outcome = run_simulation(&project, "25yr").unwrap();

    let pond = outcome.node("pond").unwrap();
    assert!(pond.outflow.is_empty());
    assert_eq!(pond.peak_outflow_cfs, 0.0);
    assert_eq!(pond.volume_acft, 0.0);
    assert!(pond.pond.is_none());

    let outlet = outcome.node("outlet").unwrap();
    assert!(outlet.outflow.is_empty());
}

#[test]
fn unknown_event_is_fatal() {
    let err = run_simulation(&detention_project(), "nope").unwrap_err();
    match err {
        EngineError::Project(ProjectError::UnknownEvent { id }) => assert_eq!(id, "nope"),
        other => panic!("expected unknown event, got {other}"),
    }
}

#[test]
fn cycle_is_fatal() {
    let mut project = detention_project();
    project.links.push(link("back", "outlet", "basin"));
    let err = run_simulation(&project, "25yr").unwrap_err();
    assert!(matches!(
        err,
        EngineError::Project(ProjectError::Cycle { .. })
    ));
}

#[test]
fn invalid_subcatchment_is_fatal() {
    let mut project = detention_project();
    if let NodeKindDef::Subcatchment(def) = &mut project.nodes[0].kind {
        def.sub_areas.clear();
    }
    let err = run_simulation(&project, "25yr").unwrap_err();
    assert!(matches!(err, EngineError::Hydrology { .. }));
}
