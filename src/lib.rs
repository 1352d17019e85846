//! # topo - Kahn topological sorter
//!
//! Orders the nodes of a directed graph so every edge points forward, or
//! reports the cycle that makes this impossible. Graphs keep incoming and
//! outgoing adjacency in two separate mappings.

pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod cycle;
pub mod error;
pub mod graph;
pub mod parse;
pub mod sort;

pub use config::{Config, InputFormat, OutputFormat, TieBreak};
pub use cycle::{find_cycle, format_cycle};
pub use error::{CycleDetected, GraphError, Result, TopoError};
pub use graph::Graph;
pub use sort::{is_topological_order, sort_with};
