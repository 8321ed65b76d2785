// src/errors.rs

//! Crate-wide error type and result alias.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Role;

#[derive(Error, Debug)]
pub enum ObserveError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("cannot watch {path:?}: {source}")]
    WatchSetup {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("failed to start {role} command '{program}': {source}")]
    SpawnFailed {
        role: Role,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to kill run process (pid {pid:?}): {source}")]
    KillFailed {
        pid: Option<u32>,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ObserveError>;

/// The single stderr line printed before exiting on a fatal error.
pub fn fatal_line(err: &impl fmt::Display) -> String {
    format!("observe error: {err}")
}
