// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::model::ServerConfig;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Result of [`init_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A default config file was written.
    Created,
    /// A config file was already present and left untouched.
    AlreadyExists,
}

/// Load a configuration file from a given path and return the raw
/// `ServerConfig`.
///
/// This only performs JSON deserialization; it does **not** check that the
/// required fields are set. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config: ServerConfig = serde_json::from_str(&contents)?;
    debug!(?path, ?config, "parsed config file");
    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// This is the entry point used before anything is watched or spawned, so a
/// broken config never gets as far as starting a process.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Write a default (empty) config file unless one already exists.
///
/// The written file deliberately fails validation until the user fills in at
/// least `buildSystem` and `executable`.
pub fn init_config(path: impl AsRef<Path>) -> Result<InitOutcome> {
    let path = path.as_ref();
    if path.exists() {
        info!(?path, "config file already exists; leaving it untouched");
        return Ok(InitOutcome::AlreadyExists);
    }

    let dump = serde_json::to_string_pretty(&ServerConfig::default())?;
    fs::write(path, dump + "\n")?;
    info!(?path, "wrote default config file");
    Ok(InitOutcome::Created)
}
