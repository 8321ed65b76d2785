// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{init_config, load_and_validate, InitOutcome};
use crate::engine::{RuntimeEvent, Supervisor};
use crate::errors::Result;
use crate::exec::{CommandStager, RealProcessBackend};
use crate::watch::{spawn_debouncer, spawn_watcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config initialisation / loading
/// - the file watcher and debouncer
/// - the supervisor and its process backend
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);

    if args.init {
        match init_config(&config_path)? {
            InitOutcome::Created => {
                println!(
                    "observe: wrote {}; fill in buildSystem and executable",
                    config_path.display()
                );
            }
            InitOutcome::AlreadyExists => {
                println!("observe: {} already exists", config_path.display());
            }
        }
        return Ok(());
    }

    let cfg = Arc::new(load_and_validate(&config_path)?);

    if !args.run {
        info!(config = ?config_path, "configuration is valid; pass --run to start observing");
        return Ok(());
    }

    // Watch setup errors are fatal and must happen before anything is spawned.
    let (_watcher_handle, streams) = spawn_watcher(cfg.watch_dirs())?;

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _debouncer = spawn_debouncer(streams, args.debounce(), rt_tx.clone());

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }
    drop(rt_tx);

    info!("Observing...");

    let stager = CommandStager::new(cfg);
    let backend = RealProcessBackend::new(args.build_failure_policy());
    let supervisor = Supervisor::new(stager, backend, rt_rx);
    supervisor.run().await
}
