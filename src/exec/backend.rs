// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! The supervisor talks to a `ProcessBackend` instead of touching
//! `tokio::process` directly. This makes it easy to swap in a fake backend in
//! tests while keeping the production implementation here.
//!
//! - `RealProcessBackend` spawns the build step, waits for it, then spawns
//!   the run step and keeps its `Child` as the single live process.
//! - Tests can provide their own `ProcessBackend` that, for example, records
//!   the order of launches and teardowns without spawning anything.

use std::future::Future;
use std::io;
use std::pin::Pin;

use tokio::process::Child;
use tracing::{debug, info, warn};

use crate::errors::{ObserveError, Result};
use crate::exec::pair::{CommandPair, PairState};
use crate::types::BuildFailurePolicy;

/// Boxed future returned by backend operations.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// What happened when a pair was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Build finished and the run step is alive.
    Running { pair: u64, pid: Option<u32> },
    /// Build failed and the policy said not to start the run step.
    BuildFailed { pair: u64, code: Option<i32> },
}

/// What happened when the live pair was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// There was no live run process.
    NothingRunning,
    /// The run process is gone and has been reaped.
    ///
    /// `killed` is false when the process had already exited by itself.
    /// `code` is `None` when it died from a signal or reaping failed.
    Reaped {
        pair: u64,
        killed: bool,
        code: Option<i32>,
    },
}

/// Trait abstracting how command pairs are executed.
///
/// Production code uses [`RealProcessBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ProcessBackend: Send {
    /// Run the pair's build step to completion, then start its run step
    /// without waiting for it.
    ///
    /// Start failures are returned as errors and are fatal.
    fn launch(&mut self, pair: CommandPair) -> BackendFuture<'_, LaunchOutcome>;

    /// Kill the live run process (if any) and block until it is reaped.
    ///
    /// Only a genuine kill failure is returned as an error; a process that is
    /// already gone or that cannot be reaped is logged and treated as done.
    fn teardown(&mut self) -> BackendFuture<'_, TeardownOutcome>;

    /// Id and state of the most recently launched pair, if it has not been
    /// torn down yet.
    fn active_pair(&self) -> Option<(u64, PairState)>;
}

/// The pair currently owned by [`RealProcessBackend`].
#[derive(Debug)]
struct ActivePair {
    id: u64,
    state: PairState,
    program: String,
    child: Option<Child>,
}

/// Real backend used in production.
///
/// This is the sole owner of the live run process handle.
#[derive(Debug, Default)]
pub struct RealProcessBackend {
    policy: BuildFailurePolicy,
    active: Option<ActivePair>,
}

impl RealProcessBackend {
    pub fn new(policy: BuildFailurePolicy) -> Self {
        Self {
            policy,
            active: None,
        }
    }

    /// Pid of the live run process, if there is one.
    pub fn live_pid(&self) -> Option<u32> {
        self.active
            .as_ref()
            .and_then(|a| a.child.as_ref())
            .and_then(Child::id)
    }

    async fn launch_inner(&mut self, pair: CommandPair) -> Result<LaunchOutcome> {
        if let Some(active) = self.active.as_ref().filter(|a| a.child.is_some()) {
            return Err(ObserveError::Other(anyhow::anyhow!(
                "launch of pair {} requested while pair {} is still running",
                pair.id,
                active.id
            )));
        }

        let CommandPair { id, build, run } = pair;
        let program = run.program().to_string();
        self.active = Some(ActivePair {
            id,
            state: PairState::Staged,
            program: program.clone(),
            child: None,
        });

        info!(pair = id, cmd = %build.display(), "starting build step");
        let mut build_child = build.spawn()?;
        if let Some(active) = self.active.as_mut() {
            active.state = PairState::Building;
        }
        let (success, code) = match build_child.wait().await {
            Ok(status) => (status.success(), status.code()),
            Err(err) => {
                warn!(pair = id, error = %err, "failed to wait for build step");
                (false, None)
            }
        };

        if success {
            debug!(pair = id, "build step succeeded");
        } else {
            warn!(pair = id, exit_code = ?code, "build step failed");
            if self.policy == BuildFailurePolicy::SkipRun {
                if let Some(active) = self.active.as_mut() {
                    active.state = PairState::Retired;
                }
                info!(pair = id, "not starting run step; waiting for the next change");
                return Ok(LaunchOutcome::BuildFailed { pair: id, code });
            }
        }

        info!(pair = id, cmd = %run.display(), "starting run step");
        let run_child = run.spawn()?;
        let pid = run_child.id();
        self.active = Some(ActivePair {
            id,
            state: PairState::Running,
            program,
            child: Some(run_child),
        });
        info!(pair = id, ?pid, "run step started");

        Ok(LaunchOutcome::Running { pair: id, pid })
    }

    async fn teardown_inner(&mut self) -> Result<TeardownOutcome> {
        let Some(active) = self.active.take() else {
            return Ok(TeardownOutcome::NothingRunning);
        };
        let ActivePair {
            id, program, child, ..
        } = active;
        let Some(mut child) = child else {
            debug!(pair = id, "no run process to tear down");
            return Ok(TeardownOutcome::NothingRunning);
        };

        let pid = child.id();
        match child.try_wait() {
            Ok(Some(status)) => {
                info!(pair = id, ?pid, %program, exit_code = ?status.code(), "run process had already exited");
                return Ok(TeardownOutcome::Reaped {
                    pair: id,
                    killed: false,
                    code: status.code(),
                });
            }
            Ok(None) => {}
            Err(err) => {
                warn!(pair = id, ?pid, error = %err, "failed to poll run process before kill");
            }
        }

        debug!(pair = id, ?pid, %program, "killing run process");
        if let Err(err) = child.start_kill() {
            if is_already_gone(&err) {
                warn!(pair = id, ?pid, error = %err, "run process vanished before kill");
            } else {
                return Err(ObserveError::KillFailed { pid, source: err });
            }
        }

        let code = match child.wait().await {
            Ok(status) => status.code(),
            Err(err) => {
                warn!(pair = id, ?pid, error = %err, "failed to reap run process; assuming it is gone");
                None
            }
        };
        info!(pair = id, ?pid, "run process stopped");

        Ok(TeardownOutcome::Reaped {
            pair: id,
            killed: true,
            code,
        })
    }
}

impl ProcessBackend for RealProcessBackend {
    fn launch(&mut self, pair: CommandPair) -> BackendFuture<'_, LaunchOutcome> {
        Box::pin(self.launch_inner(pair))
    }

    fn teardown(&mut self) -> BackendFuture<'_, TeardownOutcome> {
        Box::pin(self.teardown_inner())
    }

    fn active_pair(&self) -> Option<(u64, PairState)> {
        self.active.as_ref().map(|a| (a.id, a.state))
    }
}

/// Kill errors that only mean the process is already gone.
///
/// Anything else coming out of `start_kill` is a real failure.
pub fn is_already_gone(err: &io::Error) -> bool {
    // tokio reports an already reaped child as InvalidInput.
    if err.kind() == io::ErrorKind::InvalidInput {
        return true;
    }
    #[cfg(unix)]
    {
        // "No such process"; 3 on both Linux and macOS.
        const ESRCH: i32 = 3;
        if err.raw_os_error() == Some(ESRCH) {
            return true;
        }
    }
    false
}
