// src/engine/core.rs

//! Pure core supervisor state machine.
//!
//! This module contains a synchronous, deterministic "core" that consumes
//! [`RuntimeEvent`]s and produces:
//! - an updated supervisor state
//! - an ordered list of commands describing what the IO shell must do next
//!
//! The async shell (`engine::runtime::Supervisor`) runs those commands
//! strictly in order and reports results back through `record_launch` and
//! `record_teardown`. Because teardown is always emitted ahead of the launch
//! for the same trigger, a new run process can never start before the old one
//! has been reaped.
//!
//! The core has no channels, no Tokio types and does not perform any IO.

use tracing::debug;

use crate::engine::{RuntimeEvent, SupervisorState};
use crate::exec::LaunchOutcome;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCommand {
    /// Kill and reap the live run process, if any.
    Teardown,
    /// Pop the next staged pair and launch it.
    LaunchNext,
    /// Stage a replacement pair at the back of the queue.
    StageReplacement,
    /// Stop the supervisor loop.
    RequestExit,
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer loop should keep running.
    pub keep_running: bool,
}

#[derive(Debug)]
pub struct SupervisorCore {
    state: SupervisorState,
    restarts: u64,
}

impl Default for SupervisorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SupervisorCore {
    /// The supervisor starts out launching: the first pair runs before any
    /// trigger is processed.
    pub fn new() -> Self {
        Self {
            state: SupervisorState::Launching,
            restarts: 0,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Number of triggers handled so far.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Commands for the unconditional first launch.
    pub fn startup(&mut self) -> CoreStep {
        self.state = SupervisorState::Launching;
        CoreStep {
            commands: vec![CoreCommand::LaunchNext, CoreCommand::StageReplacement],
            keep_running: true,
        }
    }

    /// Handle a single runtime event.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        if self.state == SupervisorState::Stopped {
            return CoreStep {
                commands: Vec::new(),
                keep_running: false,
            };
        }

        match event {
            RuntimeEvent::Triggered(trigger) => {
                self.restarts += 1;
                self.state = SupervisorState::Restarting;
                debug!(
                    restart = self.restarts,
                    path = ?trigger.cause.path,
                    "trigger accepted"
                );
                CoreStep {
                    commands: vec![
                        CoreCommand::Teardown,
                        CoreCommand::LaunchNext,
                        CoreCommand::StageReplacement,
                    ],
                    keep_running: true,
                }
            }
            RuntimeEvent::ShutdownRequested => {
                self.state = SupervisorState::Stopped;
                CoreStep {
                    commands: vec![CoreCommand::Teardown, CoreCommand::RequestExit],
                    keep_running: false,
                }
            }
        }
    }

    /// The previous run process has been reaped.
    pub fn record_teardown(&mut self) {
        if self.state == SupervisorState::Restarting {
            self.state = SupervisorState::Launching;
        }
    }

    /// A launch finished (build done, run started or skipped).
    pub fn record_launch(&mut self, outcome: LaunchOutcome) {
        if self.state == SupervisorState::Stopped {
            return;
        }
        self.state = match outcome {
            LaunchOutcome::Running { .. } => SupervisorState::Running,
            LaunchOutcome::BuildFailed { .. } => SupervisorState::Idle,
        };
    }
}
