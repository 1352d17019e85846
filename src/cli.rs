use crate::config::{InputFormat, OutputFormat, TieBreak};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "topo")]
#[command(about = "Topological sort of directed graphs")]
#[command(version)]
pub struct Cli {
    /// JSON config file (defaults to $TOPO_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the graph comes from and how results are printed.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Graph file; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,
    /// Input format
    #[arg(long, value_enum)]
    pub input: Option<InputFormat>,
    /// Output format
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the nodes in topological order
    Sort {
        #[command(flatten)]
        input: InputArgs,
        /// Which ready node goes first
        #[arg(long, value_enum)]
        tie_break: Option<TieBreak>,
    },

    /// Report whether the graph is acyclic
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}
