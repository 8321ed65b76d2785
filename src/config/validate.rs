// src/config/validate.rs

use crate::config::model::ServerConfig;
use crate::errors::{ObserveError, Result};

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - `executable` is set (nothing to run otherwise)
/// - `buildSystem` is set (every launch starts with a build step)
///
/// It does **not** check that the programs exist or that `folders` are real
/// directories; those failures surface when spawning and when the watcher is
/// set up.
pub fn validate_config(cfg: &ServerConfig) -> Result<()> {
    ensure_set("executable", &cfg.executable)?;
    ensure_set("buildSystem", &cfg.build_system)?;
    Ok(())
}

fn ensure_set(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ObserveError::ConfigError(format!(
            "`{field}` must be set in the config file"
        )));
    }
    Ok(())
}
