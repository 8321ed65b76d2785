// src/watch/event.rs

use std::fmt;
use std::path::PathBuf;

use notify::event::{EventKind, ModifyKind};

/// Kind of modification reported for a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Write,
    Create,
    Remove,
    Rename,
    Chmod,
}

impl ChangeKind {
    /// Map a notify event kind onto the kinds we care about.
    ///
    /// Returns `None` for access notifications and anything else that does
    /// not describe a modification.
    pub fn from_notify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(ChangeKind::Create),
            EventKind::Remove(_) => Some(ChangeKind::Remove),
            EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Rename),
            EventKind::Modify(ModifyKind::Metadata(_)) => Some(ChangeKind::Chmod),
            EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other) => {
                Some(ChangeKind::Write)
            }
            EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Write => "write",
            ChangeKind::Create => "create",
            ChangeKind::Remove => "remove",
            ChangeKind::Rename => "rename",
            ChangeKind::Chmod => "chmod",
        };
        f.write_str(s)
    }
}

/// A single change to a single watched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Only writes are allowed to restart the managed process.
    pub fn is_write(&self) -> bool {
        self.kind == ChangeKind::Write
    }
}

/// Restart signal emitted by the debouncer.
///
/// The causing event is kept for logging only; the supervisor reacts to every
/// trigger the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub cause: ChangeEvent,
}
