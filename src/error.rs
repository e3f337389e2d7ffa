//! Error types for configuration loading and the command-line front end.
//!
//! Transport failures inside a campaign are not represented here: they are
//! counted and swallowed per round (see [`crate::transmit`]).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Campaign configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Config file is not valid YAML for a campaign
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yml::Error),

    /// Duration string not understood by humantime
    #[error("Invalid duration {value:?}: {source}")]
    Duration {
        /// Offending value
        value: String,
        /// Parser error
        #[source]
        source: humantime::DurationError,
    },

    /// Parallel spray needs at least one worker
    #[error("workers must be at least 1")]
    NoWorkers,
}

/// Top-level error for the binaries.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Campaign worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Failed to encode statistics: {0}")]
    Json(#[from] serde_json::Error),
}
