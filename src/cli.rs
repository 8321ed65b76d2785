// src/cli.rs

//! CLI argument parsing using `clap`.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::types::BuildFailurePolicy;
use crate::watch::DEFAULT_DEBOUNCE;

/// Command-line arguments for `observe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "observe",
    version,
    about = "Rebuild and restart a command whenever watched folders change.",
    long_about = None
)]
pub struct CliArgs {
    /// Initialise the directory for observation (writes a default config).
    #[arg(long)]
    pub init: bool,

    /// Run the executable and observe.
    #[arg(long)]
    pub run: bool,

    /// Path to the config file (JSON).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Debounce window in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_DEBOUNCE.as_millis() as u64)]
    pub debounce_ms: u64,

    /// Start the run command even when the build command fails.
    #[arg(long)]
    pub run_after_failed_build: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `OBSERVE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn build_failure_policy(&self) -> BuildFailurePolicy {
        if self.run_after_failed_build {
            BuildFailurePolicy::RunAnyway
        } else {
            BuildFailurePolicy::SkipRun
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
