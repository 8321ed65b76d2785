// src/config/model.rs

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level configuration as read from `obsconfig.json`.
///
/// ```json
/// {
///   "buildSystem": "cargo",
///   "buildArgs": ["build"],
///   "executable": "target/debug/server",
///   "args": ["--port", "8080"],
///   "folders": ["src", "templates"]
/// }
/// ```
///
/// Every field is optional on disk; validation decides which ones are
/// actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Build system executable, run to completion before every launch.
    #[serde(default)]
    pub build_system: String,

    /// Arguments for the build system, passed verbatim.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub build_args: Vec<String>,

    /// The long-running executable that gets restarted.
    #[serde(default)]
    pub executable: String,

    /// Arguments for the executable, passed verbatim.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<String>,

    /// Extra directories to watch next to the working directory.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub folders: Vec<String>,
}

impl ServerConfig {
    /// Directories handed to the watcher: the working directory first, then
    /// every configured folder in order.
    pub fn watch_dirs(&self) -> Vec<PathBuf> {
        std::iter::once(PathBuf::from("."))
            .chain(self.folders.iter().map(PathBuf::from))
            .collect()
    }
}

// Default files written by older tooling spell empty lists as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
