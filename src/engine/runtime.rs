// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::{CommandStager, LaunchOutcome, ProcessBackend, StagingQueue, TeardownOutcome};

use super::core::{CoreCommand, SupervisorCore};
use super::{RuntimeEvent, SupervisorState};

/// Drives the build/run cycle in response to `RuntimeEvent`s and delegates
/// process handling to a `ProcessBackend`.
///
/// This is an IO shell around `SupervisorCore`, which decides what happens
/// and in which order. This struct owns everything the core must not touch:
/// the event receiver, the stager, the staging queue and the backend holding
/// the live process. Events are handled strictly one at a time.
pub struct Supervisor<B: ProcessBackend> {
    core: SupervisorCore,
    stager: CommandStager,
    queue: StagingQueue,
    backend: B,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl<B: ProcessBackend> fmt::Debug for Supervisor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("core", &self.core)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl<B: ProcessBackend> Supervisor<B> {
    /// Create a supervisor with a staging queue primed with two pairs.
    pub fn new(
        mut stager: CommandStager,
        backend: B,
        event_rx: mpsc::Receiver<RuntimeEvent>,
    ) -> Self {
        let queue = StagingQueue::primed(&mut stager);
        Self {
            core: SupervisorCore::new(),
            stager,
            queue,
            backend,
            event_rx,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.core.state()
    }

    pub fn restarts(&self) -> u64 {
        self.core.restarts()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Main loop.
    ///
    /// - Launches the first staged pair unconditionally.
    /// - Then consumes `RuntimeEvent`s until shutdown or until every sender
    ///   is gone.
    pub async fn run(mut self) -> Result<()> {
        info!("supervisor started");
        self.start().await?;

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            if !self.handle(event).await? {
                info!("core requested exit; stopping supervisor");
                break;
            }
        }

        info!("supervisor exiting");
        Ok(())
    }

    /// Run the initial launch. Happens before any event is consumed.
    pub async fn start(&mut self) -> Result<()> {
        let step = self.core.startup();
        for command in step.commands {
            self.execute_command(command).await?;
        }
        Ok(())
    }

    /// Feed one event through the core and execute the resulting commands.
    ///
    /// Returns whether the supervisor should keep running.
    pub async fn handle(&mut self, event: RuntimeEvent) -> Result<bool> {
        debug!(?event, "supervisor received event");
        if let RuntimeEvent::Triggered(ref trigger) = event {
            info!(path = ?trigger.cause.path, kind = %trigger.cause.kind, "restarting");
        }

        let step = self.core.step(event);
        for command in step.commands {
            self.execute_command(command).await?;
        }
        Ok(step.keep_running)
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::Teardown => {
                let outcome = self.backend.teardown().await?;
                match outcome {
                    TeardownOutcome::NothingRunning => {
                        debug!("nothing running to tear down");
                    }
                    TeardownOutcome::Reaped { pair, killed, code } => {
                        debug!(pair, killed, exit_code = ?code, "previous pair retired");
                    }
                }
                self.core.record_teardown();
            }
            CoreCommand::LaunchNext => {
                let pair = match self.queue.pop_front() {
                    Some(pair) => pair,
                    None => {
                        warn!("staging queue unexpectedly empty; staging inline");
                        self.stager.stage()
                    }
                };
                let outcome = self.backend.launch(pair).await?;
                if let LaunchOutcome::BuildFailed { pair, code } = outcome {
                    debug!(pair, exit_code = ?code, "launch stopped after build step");
                }
                self.core.record_launch(outcome);
            }
            CoreCommand::StageReplacement => {
                self.queue.push_back(self.stager.stage());
            }
            CoreCommand::RequestExit => {
                info!("core issued RequestExit command");
            }
        }
        Ok(())
    }
}
