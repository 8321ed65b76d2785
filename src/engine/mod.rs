// src/engine/mod.rs

//! Supervision engine for observe.
//!
//! This module ties together:
//! - the staging queue of ready-to-launch command pairs
//! - the process backend that owns the live run process
//! - the main event loop that reacts to:
//!   - debounced restart triggers
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use crate::watch::Trigger;

/// Events flowing into the supervisor from the debouncer and signal handlers.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A debounced write happened; restart now.
    Triggered(Trigger),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Where the supervisor is in its build → run → restart cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// Waiting for a trigger. A run process may or may not be alive.
    Idle,
    /// Build step executing.
    Launching,
    /// Run step alive.
    Running,
    /// Tearing down the previous run process.
    Restarting,
    /// Shut down; no further events are processed.
    Stopped,
}

pub mod core;
pub mod runtime;

pub use self::core::{CoreCommand, CoreStep, SupervisorCore};
pub use self::runtime::Supervisor;
