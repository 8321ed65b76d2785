// src/watch/watcher.rs

use std::path::PathBuf;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{info, trace};

use crate::errors::{ObserveError, Result};
use crate::watch::event::{ChangeEvent, ChangeKind};

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle stops file watching and closes the
/// streams returned next to it.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    dirs: Vec<PathBuf>,
}

impl WatcherHandle {
    /// Directories registered with the watcher, in registration order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("dirs", &self.dirs)
            .finish_non_exhaustive()
    }
}

/// The two streams the debouncer consumes.
///
/// Both are unbounded: the notify callback runs on a foreign thread and must
/// never block.
#[derive(Debug)]
pub struct ChangeStreams {
    pub events: mpsc::UnboundedReceiver<ChangeEvent>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

impl ChangeStreams {
    /// Build a pair of streams fed by hand instead of by a watcher.
    pub fn channel() -> (
        mpsc::UnboundedSender<ChangeEvent>,
        mpsc::UnboundedSender<notify::Error>,
        Self,
    ) {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (error_tx, errors) = mpsc::unbounded_channel();
        (event_tx, error_tx, Self { events, errors })
    }
}

/// Spawn a filesystem watcher over `dirs`, each watched non-recursively.
///
/// Any directory that cannot be registered (missing, permission denied) is a
/// setup error and is returned before anything downstream is started.
pub fn spawn_watcher(dirs: Vec<PathBuf>) -> Result<(WatcherHandle, ChangeStreams)> {
    let (event_tx, error_tx, streams) = ChangeStreams::channel();

    // Called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let Some(kind) = ChangeKind::from_notify(&event.kind) else {
                    trace!(?event, "ignoring non-modifying notify event");
                    return;
                };
                for path in event.paths {
                    // Receiver gone means the pipeline is shutting down.
                    let _ = event_tx.send(ChangeEvent::new(path, kind));
                }
            }
            Err(err) => {
                let _ = error_tx.send(err);
            }
        },
        Config::default(),
    )
    .map_err(|source| ObserveError::WatchSetup {
        path: PathBuf::from("."),
        source,
    })?;

    for dir in &dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| ObserveError::WatchSetup {
                path: dir.clone(),
                source,
            })?;
        info!(path = ?dir, "watching directory");
    }

    Ok((
        WatcherHandle {
            _inner: watcher,
            dirs,
        },
        streams,
    ))
}
