use crate::cli::InputArgs;
use crate::config::{Config, OutputFormat, Overrides, TieBreak};
use crate::error::{CycleDetected, Result, TopoError};
use crate::graph::Graph;
use crate::parse::parse_graph;
use crate::sort::sort_with;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

#[derive(Serialize)]
struct OrderOutput<'a> {
    order: &'a [String],
}

#[derive(Serialize)]
struct CheckOutput {
    acyclic: bool,
    nodes: usize,
    edges: usize,
}

#[derive(Serialize)]
struct CycleOutput<'a> {
    error: &'static str,
    unresolved: &'a [String],
    cycle: &'a [String],
}

/// Handle the sort command
pub fn handle_sort(
    config_path: Option<&Path>,
    input: &InputArgs,
    tie_break: Option<TieBreak>,
) -> Result<()> {
    let config = resolve_config(config_path, input, tie_break)?;
    let graph = load_graph(input, &config)?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        tie_break = %config.tie_break,
        "sorting graph"
    );

    match sort_graph(graph, config.tie_break) {
        Ok(order) => {
            print!("{}", render_order(&order, config.output_format)?);
            Ok(())
        }
        Err(err) => fail_with_cycle(err, config.output_format),
    }
}

/// Handle the check command
pub fn handle_check(config_path: Option<&Path>, input: &InputArgs) -> Result<()> {
    let config = resolve_config(config_path, input, None)?;
    let graph = load_graph(input, &config)?;
    let (nodes, edges) = (graph.node_count(), graph.edge_count());

    match sort_graph(graph, config.tie_break) {
        Ok(_) => {
            let report = CheckOutput {
                acyclic: true,
                nodes,
                edges,
            };
            match config.output_format {
                OutputFormat::Text => println!("acyclic: {nodes} nodes, {edges} edges"),
                OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
            }
            Ok(())
        }
        Err(err) => fail_with_cycle(err, config.output_format),
    }
}

fn resolve_config(
    config_path: Option<&Path>,
    input: &InputArgs,
    tie_break: Option<TieBreak>,
) -> Result<Config> {
    let config = Config::load(config_path)?.apply(Overrides {
        tie_break,
        input_format: input.input,
        output_format: input.output,
    });
    Ok(config)
}

fn load_graph(input: &InputArgs, config: &Config) -> Result<Graph<String>> {
    let text = read_input(input.file.as_deref())?;
    parse_graph(&text, config.input_format)
}

/// Read the whole input from `file`, or stdin for `None` and `-`.
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Sort `graph`, turning a failure into [`TopoError::Cycle`] with one
/// concrete cycle attached.
pub fn sort_graph(graph: Graph<String>, tie_break: TieBreak) -> Result<Vec<String>> {
    // Sorting consumes the graph; the copy feeds cycle diagnostics.
    let snapshot = graph.clone();
    sort_with(graph, tie_break).map_err(|err| cycle_error(&snapshot, err))
}

fn cycle_error(graph: &Graph<String>, err: CycleDetected<String>) -> TopoError {
    let cycle = err.find_cycle(graph).unwrap_or_default();
    TopoError::Cycle {
        unresolved: err.unresolved,
        cycle,
    }
}

/// Render an ordering for stdout.
pub fn render_order(order: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(order.iter().map(|node| format!("{node}\n")).collect()),
        OutputFormat::Json => {
            let json = serde_json::to_string(&OrderOutput { order })?;
            Ok(format!("{json}\n"))
        }
    }
}

/// Report a failed sort and hand back the original error.
///
/// A report that cannot be written is logged; the caller still sees the cycle.
fn fail_with_cycle(err: TopoError, format: OutputFormat) -> Result<()> {
    if let Err(report_err) = report_cycle(&err, format) {
        warn!(error = %report_err, "failed to write cycle report");
    }
    Err(err)
}

/// In JSON mode a cycle is also reported on stdout so pipelines can parse it.
fn report_cycle(err: &TopoError, format: OutputFormat) -> Result<()> {
    if let (OutputFormat::Json, TopoError::Cycle { unresolved, cycle }) = (format, err) {
        let output = CycleOutput {
            error: err.error_code(),
            unresolved,
            cycle,
        };
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(())
}
