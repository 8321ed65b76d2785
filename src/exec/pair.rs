// src/exec/pair.rs

use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::errors::{ObserveError, Result};
use crate::types::Role;

/// Lifecycle of a command pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    /// Constructed, nothing started yet.
    Staged,
    /// Build step started, waiting for it to exit.
    Building,
    /// Run step started and alive.
    Running,
    /// Killed or exited; nothing left to reap.
    Retired,
}

/// One ready-to-spawn command, tagged with its role in the pair.
///
/// All three standard streams are inherited from the supervisor.
#[derive(Debug)]
pub struct StagedCommand {
    role: Role,
    program: String,
    args: Vec<String>,
    command: Command,
}

impl StagedCommand {
    pub fn new(role: Role, program: impl Into<String>, args: &[String]) -> Self {
        let program = program.into();
        let mut command = Command::new(&program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if role == Role::Run {
            command.kill_on_drop(true);
        }

        Self {
            role,
            program,
            args: args.to_vec(),
            command,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Human-readable command line for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Start the process. Start failures are fatal to the supervisor.
    pub fn spawn(mut self) -> Result<Child> {
        self.command
            .spawn()
            .map_err(|source| ObserveError::SpawnFailed {
                role: self.role,
                program: self.program,
                source,
            })
    }
}

/// A build command and the run command that follows it.
#[derive(Debug)]
pub struct CommandPair {
    pub id: u64,
    pub build: StagedCommand,
    pub run: StagedCommand,
}
