// src/logging.rs

//! Logging for `observe`, built on `tracing` + `tracing-subscriber`.
//!
//! The filter comes from the first source that yields valid directives:
//! 1. `--log-level` (applies to every target)
//! 2. `OBSERVE_LOG`, in `EnvFilter` syntax (e.g. `observe=debug,notify=warn`)
//! 3. `RUST_LOG`
//! 4. `info`
//!
//! Everything goes to stderr. Child processes write straight to the
//! inherited terminal, so their output interleaves with ours.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "OBSERVE_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let observe_log = std::env::var(LOG_ENV).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(cli_level, observe_log.as_deref(), rust_log.as_deref());

    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter `{directives}`"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Pick the filter directives for a flag value and the two env values.
///
/// Env values that don't parse as a filter are skipped rather than
/// rejected, so a malformed `OBSERVE_LOG=observe=loud` falls through to
/// the next source.
pub fn filter_directives(
    cli_level: Option<LogLevel>,
    observe_log: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    if let Some(level) = cli_level {
        return level.as_directive().to_string();
    }

    [observe_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty() && EnvFilter::try_new(s).is_ok())
        .unwrap_or(DEFAULT_DIRECTIVES)
        .to_string()
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
