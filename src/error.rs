//! Error types reported to callers of the match API.
//!
//! None of these stop a running match; the simulation loop itself has no
//! recoverable faults.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by match construction and command routing.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A command was tagged with a player that is not part of the match.
    #[error("direction command for unknown player {player}")]
    InvalidDirectionCommand { player: usize },
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] MatchError),
}
