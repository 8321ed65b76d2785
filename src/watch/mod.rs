// src/watch/mod.rs

//! File watching and debouncing.
//!
//! This module is responsible for:
//! - Registering the watch set with a cross-platform watcher (`notify`).
//! - Normalising raw notify events into [`ChangeEvent`]s.
//! - Debouncing bursts of writes into rate-limited [`Trigger`]s.
//!
//! It does **not** know about processes; it only turns filesystem changes
//! into restart signals for the supervisor.

pub mod debounce;
pub mod event;
pub mod watcher;

pub use debounce::{run_debouncer, spawn_debouncer, Debouncer, Decision, DEFAULT_DEBOUNCE};
pub use event::{ChangeEvent, ChangeKind, Trigger};
pub use watcher::{spawn_watcher, ChangeStreams, WatcherHandle};
