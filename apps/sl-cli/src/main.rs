use clap::Parser;
use serde::Serialize;
use sl_engine::{run_simulation, EngineError, NodeResult, SimulationOutcome};
use sl_project::{load_project, topological_sort, validate_project, ProjectDef, ProjectError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "stormlab-cli")]
#[command(about = "StormLab - stormwater drainage network simulation", version)]
struct Cli {
    /// Path to the project JSON file
    project: PathBuf,

    /// Rainfall event id to simulate (defaults to the project's first event)
    #[arg(long)]
    event: Option<String>,

    /// Emit results as JSON (full hydrograph arrays omitted)
    #[arg(long)]
    json: bool,

    /// Validate the project and exit: 0 if clean, 1 otherwise
    #[arg(long)]
    validate: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, EngineError> {
    let project = load_project(&cli.project).map_err(EngineError::Project)?;

    if cli.validate {
        return Ok(cmd_validate(&project));
    }

    let event_id = match &cli.event {
        Some(id) => id.clone(),
        None => project
            .events
            .first()
            .map(|e| e.id.clone())
            .ok_or(EngineError::Project(ProjectError::NoEvents))?,
    };

    let outcome = run_simulation(&project, &event_id)?;
    if cli.json {
        print_json(&outcome);
    } else {
        print_table(&project, &outcome)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_validate(project: &ProjectDef) -> ExitCode {
    let findings = validate_project(project);
    if findings.is_empty() {
        println!("✓ Project is valid");
        ExitCode::SUCCESS
    } else {
        println!("Project has {} problem(s):", findings.len());
        for finding in &findings {
            println!("  - {finding}");
        }
        ExitCode::FAILURE
    }
}

fn print_table(project: &ProjectDef, outcome: &SimulationOutcome) -> Result<(), EngineError> {
    let event = project
        .events
        .iter()
        .find(|e| e.id == outcome.event_id)
        .expect("outcome came from this project");
    println!(
        "Event: {} ({}, {:.2} in, {} storm)",
        event.id, event.label, event.total_depth_in, event.storm_type
    );
    println!();
    println!(
        "{:<20} {:<13} {:>12} {:>13} {:>9} {:>13} {:>12}",
        "Node", "Kind", "Peak In", "Peak Out", "Tp", "Volume", "Peak Stage"
    );
    println!(
        "{:<20} {:<13} {:>12} {:>13} {:>9} {:>13} {:>12}",
        "", "", "(cfs)", "(cfs)", "(hr)", "(ac-ft)", "(ft)"
    );

    // report in flow order
    let order = topological_sort(&project.nodes, &project.links).map_err(EngineError::Project)?;
    for node_id in &order {
        let Some(result) = outcome.results.get(node_id) else {
            continue;
        };
        let (peak_in, peak_stage) = match &result.pond {
            Some(p) => (
                format!("{:.1}", p.peak_inflow_cfs),
                format!("{:.2}", p.peak_stage_ft),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        println!(
            "{:<20} {:<13} {:>12} {:>13.1} {:>9.2} {:>13.2} {:>12}",
            result.node_name,
            result.kind,
            peak_in,
            result.peak_outflow_cfs,
            result.time_of_peak_hr,
            result.volume_acft,
            peak_stage
        );
    }
    Ok(())
}

/// JSON summary row: everything from [`NodeResult`] except the hydrograph.
#[derive(Serialize)]
struct NodeSummary<'a> {
    name: &'a str,
    kind: &'a str,
    peak_outflow_cfs: f64,
    time_of_peak_hr: f64,
    volume_acft: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    peak_inflow_cfs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peak_stage_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peak_storage_cuft: Option<f64>,
}

#[derive(Serialize)]
struct OutcomeSummary<'a> {
    #[serde(rename = "eventId")]
    event_id: &'a str,
    results: BTreeMap<&'a str, NodeSummary<'a>>,
}

fn summarize<'a>(result: &'a NodeResult) -> NodeSummary<'a> {
    NodeSummary {
        name: &result.node_name,
        kind: result.kind,
        peak_outflow_cfs: result.peak_outflow_cfs,
        time_of_peak_hr: result.time_of_peak_hr,
        volume_acft: result.volume_acft,
        peak_inflow_cfs: result.pond.as_ref().map(|p| p.peak_inflow_cfs),
        peak_stage_ft: result.pond.as_ref().map(|p| p.peak_stage_ft),
        peak_storage_cuft: result.pond.as_ref().map(|p| p.peak_storage_cuft),
    }
}

fn print_json(outcome: &SimulationOutcome) {
    let summary = OutcomeSummary {
        event_id: &outcome.event_id,
        results: outcome
            .results
            .iter()
            .map(|(id, result)| (id.as_str(), summarize(result)))
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
}
