// src/watch/watcher.rs

use std::fs;
use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::WatchError;

/// Handle for one live watch set.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping the handle
/// closes the watch set and ends its forwarding task. Exactly one of these
/// exists at a time, owned by the runtime.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    dirs: Vec<PathBuf>,
}

impl WatcherHandle {
    /// Directories registered with this watch set, in registration order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("dirs", &self.dirs.len())
            .finish()
    }
}

/// Build a new watch set over `root` and the dependency directories.
///
/// The root is expanded to its full subtree when `recursive` is set,
/// otherwise registered alone. Dependency directories are always expanded,
/// so nested library files are covered either way. Every enumerated
/// directory is registered individually; any traversal or registration error
/// aborts the whole build.
///
/// Cleanup of any prior watch set is the caller's responsibility.
pub fn build_watch_set(
    root: impl Into<PathBuf>,
    deps: &[PathBuf],
    recursive: bool,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle, WatchError> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or(root); // best-effort

    let mut dirs = if recursive {
        list_dirs(&root)?
    } else {
        vec![root.clone()]
    };
    for dep in deps {
        dirs.extend(list_dirs(dep)?);
    }

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Err(err) = event_tx.send(res) {
                // We can't log via tracing here easily, so fallback to stderr.
                eprintln!("watchrun: failed to forward notify event: {err}");
            }
        },
        NotifyConfig::default(),
    )
    .map_err(WatchError::Backend)?;

    for dir in &dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Register {
                path: dir.clone(),
                source,
            })?;
    }

    info!(dirs = dirs.len(), root = ?root, "watch set installed");

    // Async task that consumes notify events and forwards source changes to
    // the runtime. Ends when either side of it goes away.
    tokio::spawn(async move {
        while let Some(res) = event_rx.recv().await {
            match res {
                Ok(event) => {
                    if !is_source_change(&event.kind) {
                        continue;
                    }
                    let Some(path) = event.paths.first().cloned() else {
                        continue;
                    };
                    debug!(?path, kind = ?event.kind, "source change");
                    if runtime_tx
                        .send(RuntimeEvent::SourceChanged { path })
                        .await
                        .is_err()
                    {
                        // Runtime is gone; nothing left to notify.
                        return;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "filesystem watch backend error");
                    let _ = runtime_tx
                        .send(RuntimeEvent::WatchFailed(WatchError::Backend(err)))
                        .await;
                    return;
                }
            }
        }
        debug!("watch forwarding task ended");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        dirs,
    })
}

/// Whether an event kind counts as a source change (create/write/remove).
///
/// Pure metadata changes (chmod, timestamps) don't trigger rebuilds.
fn is_source_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Enumerate `root` and every descendant directory.
///
/// Symlinks are not followed. Any traversal error aborts the enumeration.
fn list_dirs(root: &Path) -> Result<Vec<PathBuf>, WatchError> {
    let mut dirs = vec![root.to_path_buf()];
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(|source| WatchError::Walk {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| WatchError::Walk {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            let ty = entry.file_type().map_err(|source| WatchError::Walk {
                path: path.clone(),
                source,
            })?;
            if ty.is_dir() {
                dirs.push(path.clone());
                stack.push(path);
            }
        }
    }

    Ok(dirs)
}
