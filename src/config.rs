//! Tool configuration.
//!
//! Values come from built-in defaults, then an optional JSON config file,
//! then command line flags.

use crate::error::{Result, TopoError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "TOPO_CONFIG";

/// Which ready node is emitted first when several are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Sources in node insertion order, then first-in first-out.
    #[default]
    Insertion,
    /// Smallest label first.
    Lexicographic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// JSON if the input starts with `{`, edge list otherwise.
    #[default]
    Auto,
    /// `a -> b` lines.
    Edges,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One node per line.
    #[default]
    Text,
    Json,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Insertion => write!(f, "insertion"),
            TieBreak::Lexicographic => write!(f, "lexicographic"),
        }
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tie_break: TieBreak,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
}

/// Command line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub tie_break: Option<TieBreak>,
    pub input_format: Option<InputFormat>,
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Load the config file at `path`, or the one named by `TOPO_CONFIG`,
    /// or fall back to defaults when neither is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        };

        match path {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Read a JSON config file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            TopoError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_json(&text)
            .map_err(|e| TopoError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }

    /// Parse config from JSON text; absent keys keep their defaults.
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Apply command line values on top of this config.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(tie_break) = overrides.tie_break {
            self.tie_break = tie_break;
        }
        if let Some(input_format) = overrides.input_format {
            self.input_format = input_format;
        }
        if let Some(output_format) = overrides.output_format {
            self.output_format = output_format;
        }
        self
    }
}
