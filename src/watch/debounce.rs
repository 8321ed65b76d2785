// src/watch/debounce.rs

//! Turn a burst of change events into at most one trigger per window.
//!
//! The decision logic lives in [`Debouncer`], a plain state machine with no
//! clock of its own. [`run_debouncer`] is the async shell that owns the timer
//! and feeds ticks and events into it.
//!
//! A write only triggers when the window is "quiet", i.e. a full interval has
//! elapsed since the debouncer started, since the last trigger, and since the
//! last write that was suppressed. Non-write events are observed and dropped
//! without touching the timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::watch::event::{ChangeEvent, Trigger};
use crate::watch::watcher::ChangeStreams;

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the debouncer made of a single change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Quiet write: emit a trigger and restart the window.
    Trigger,
    /// Write inside a busy window: drop it and restart the window.
    Suppressed,
    /// Not a write: drop it, leave the window alone.
    Ignored,
}

impl Decision {
    /// Whether the shell has to restart its timer after this decision.
    pub fn restarts_window(self) -> bool {
        !matches!(self, Decision::Ignored)
    }
}

/// Pure debounce state.
#[derive(Debug, Default)]
pub struct Debouncer {
    quiet: bool,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// A full window elapsed without interruption.
    pub fn on_tick(&mut self) {
        self.quiet = true;
    }

    pub fn on_event(&mut self, event: &ChangeEvent) -> Decision {
        if !event.is_write() {
            return Decision::Ignored;
        }
        if self.quiet {
            self.quiet = false;
            Decision::Trigger
        } else {
            Decision::Suppressed
        }
    }
}

/// Spawn [`run_debouncer`] as a background Tokio task.
pub fn spawn_debouncer(
    streams: ChangeStreams,
    interval: Duration,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> JoinHandle<()> {
    tokio::spawn(run_debouncer(streams, interval, runtime_tx))
}

/// Debounce loop.
///
/// Runs until the event stream closes (watcher dropped) or the runtime stops
/// listening for triggers. Watch errors are logged and otherwise ignored.
pub async fn run_debouncer(
    mut streams: ChangeStreams,
    interval: Duration,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    info!(?interval, "debouncer started");

    let mut debouncer = Debouncer::new();
    let timer = sleep(interval);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            biased;

            maybe_event = streams.events.recv() => {
                let Some(event) = maybe_event else {
                    debug!("change event stream closed");
                    break;
                };

                let decision = debouncer.on_event(&event);
                debug!(path = ?event.path, kind = %event.kind, ?decision, "change event");

                if decision.restarts_window() {
                    timer.as_mut().reset(Instant::now() + interval);
                }

                if decision == Decision::Trigger {
                    info!(path = ?event.path, "change detected; requesting restart");
                    let trigger = Trigger { cause: event };
                    if runtime_tx.send(RuntimeEvent::Triggered(trigger)).await.is_err() {
                        debug!("trigger receiver dropped");
                        break;
                    }
                }
            }

            Some(err) = streams.errors.recv() => {
                warn!(error = %err, "file watch error");
            }

            () = &mut timer => {
                debouncer.on_tick();
                timer.as_mut().reset(Instant::now() + interval);
            }
        }
    }

    info!("debouncer finished");
}
