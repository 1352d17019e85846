//! Error types for topo.
//!
//! Graph construction and sorting report typed, generic errors; the
//! application layer folds them into [`TopoError`].

use crate::cycle::format_cycle;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for application level operations.
pub type Result<T> = std::result::Result<T, TopoError>;

/// Which adjacency mapping an edge was missing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Incoming,
    Outgoing,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Incoming => write!(f, "incoming"),
            Side::Outgoing => write!(f, "outgoing"),
        }
    }
}

/// Rejection of caller supplied adjacency mappings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<N> {
    /// A mapping key or member is not in the node set.
    #[error("node {0:?} is not part of the graph")]
    UnknownNode(N),

    /// An edge appears on one side of the dual adjacency only.
    #[error("edge {from:?} -> {to:?} is missing from the {missing_side} mapping")]
    Inconsistent { from: N, to: N, missing_side: Side },
}

/// The graph has no topological ordering.
///
/// `ordered` is the prefix Kahn's algorithm managed to emit, `unresolved`
/// holds every other node (in insertion order); each of them still had
/// incoming edges when the frontier drained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "cycle detected: {} of {} nodes could not be ordered",
    .unresolved.len(),
    .ordered.len() + .unresolved.len()
)]
pub struct CycleDetected<N> {
    pub ordered: Vec<N>,
    pub unresolved: Vec<N>,
}

/// All errors surfaced by the `topo` tool.
#[derive(Error, Debug)]
pub enum TopoError {
    /// The input graph is not a DAG.
    #[error("Cycle detected: {path}", path = format_cycle(cycle.as_slice()))]
    Cycle {
        unresolved: Vec<String>,
        cycle: Vec<String>,
    },

    /// Adjacency mappings were rejected.
    #[error("Invalid graph: {0}")]
    InvalidGraph(#[from] GraphError<String>),

    /// Malformed edge list line.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// JSON graph document with an invalid shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Bad or missing configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TopoError {
    /// Stable name of the error kind, used in JSON output.
    pub fn error_code(&self) -> &'static str {
        match self {
            TopoError::Cycle { .. } => "CycleDetected",
            TopoError::InvalidGraph(_) => "InvalidGraph",
            TopoError::Parse { .. } => "ParseError",
            TopoError::InvalidDocument(_) => "InvalidDocument",
            TopoError::Config(_) => "ConfigError",
            TopoError::Io(_) => "IoError",
            TopoError::Json(_) => "JsonError",
        }
    }
}
