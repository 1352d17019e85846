//! Reading graphs from text.
//!
//! Two input formats are understood:
//!
//! * edge lists, one statement per line:
//!
//!   ```text
//!   # comment
//!   a -> b, c      # a points to b and c
//!   c -> d -> e    # chains are allowed
//!   lonely         # isolated node
//!   ```
//!
//! * JSON documents, either `{"nodes": [...], "edges": [["a", "b"]]}` or
//!   `{"nodes": [...], "incoming": {...}, "outgoing": {...}}`.

use crate::config::InputFormat;
use crate::error::{Result, TopoError};
use crate::graph::Graph;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

const ARROW: &str = "->";

/// Parse `text` in the given format.
pub fn parse_graph(text: &str, format: InputFormat) -> Result<Graph<String>> {
    let format = match format {
        InputFormat::Auto => detect_format(text),
        other => other,
    };

    let graph = match format {
        InputFormat::Json => parse_json(text)?,
        _ => parse_edge_list(text)?,
    };

    debug!(
        ?format,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed graph"
    );
    Ok(graph)
}

/// JSON if the first non-whitespace character opens an object.
pub fn detect_format(text: &str) -> InputFormat {
    if text.trim_start().starts_with('{') {
        InputFormat::Json
    } else {
        InputFormat::Edges
    }
}

/// Parse an edge list.
pub fn parse_edge_list(text: &str) -> Result<Graph<String>> {
    let mut graph = Graph::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let statement = match raw.find('#') {
            Some(at) => &raw[..at],
            None => raw,
        }
        .trim();

        if statement.is_empty() {
            continue;
        }

        let mut previous: Option<Vec<String>> = None;
        for part in statement.split(ARROW) {
            let labels = parse_labels(part, line)?;
            for label in &labels {
                graph.add_node(label.clone());
            }
            if let Some(sources) = &previous {
                for from in sources {
                    for to in &labels {
                        graph.add_edge(from.clone(), to.clone());
                    }
                }
            }
            previous = Some(labels);
        }
    }

    Ok(graph)
}

fn parse_labels(part: &str, line: usize) -> Result<Vec<String>> {
    part.split(',')
        .map(|label| {
            let label = label.trim();
            if label.is_empty() {
                return Err(TopoError::Parse {
                    line,
                    message: "missing node label".to_string(),
                });
            }
            if label.contains(char::is_whitespace) {
                return Err(TopoError::Parse {
                    line,
                    message: format!("node label '{label}' contains whitespace"),
                });
            }
            Ok(label.to_string())
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphDocument {
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<(String, String)>,
    incoming: Option<BTreeMap<String, Vec<String>>>,
    outgoing: Option<BTreeMap<String, Vec<String>>>,
}

/// Parse a JSON graph document.
pub fn parse_json(text: &str) -> Result<Graph<String>> {
    let doc: GraphDocument = serde_json::from_str(text)?;

    if doc.incoming.is_none() && doc.outgoing.is_none() {
        let mut graph = Graph::new();
        for node in doc.nodes {
            graph.add_node(node);
        }
        for (from, to) in doc.edges {
            graph.add_edge(from, to);
        }
        return Ok(graph);
    }

    if !doc.edges.is_empty() {
        return Err(TopoError::InvalidDocument(
            "\"edges\" cannot be combined with \"incoming\"/\"outgoing\"".to_string(),
        ));
    }

    let incoming = doc.incoming.unwrap_or_default();
    let outgoing = doc.outgoing.unwrap_or_default();

    // Without an explicit node list the mapping keys define the nodes.
    let nodes = if doc.nodes.is_empty() {
        let mut keys: Vec<String> = outgoing.keys().chain(incoming.keys()).cloned().collect();
        keys.sort();
        keys.dedup();
        keys
    } else {
        doc.nodes
    };

    Ok(Graph::from_adjacency(nodes, incoming, outgoing)?)
}
