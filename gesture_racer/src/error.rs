//! Errors raised at the application boundary.
//!
//! The per-tick core never fails; these cover setting things up and the
//! frame source going away.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RacerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("window: {0}")]
    Window(String),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path:   PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker could not be opened at all.
    #[error("hand tracker unavailable: {0}")]
    Unavailable(String),

    /// The frame source went away mid-run.
    #[error("hand tracker disconnected: {0}")]
    Disconnected(String),
}
