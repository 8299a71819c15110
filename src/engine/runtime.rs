// src/engine/runtime.rs

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::build::Resolver;
use crate::config::Config;
use crate::errors::WatchError;
use crate::exec::{self, TrackedProcess};
use crate::watch::{self, WatcherHandle};

/// Result of a tracked process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Clean,
    Failed(i32), // exit code, -1 when none was available
}

/// Events sent into the runtime from the watcher, waiters, or the signal
/// listener.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// A watched file was created, written, or removed.
    SourceChanged { path: PathBuf },
    /// A tracked (or formerly tracked) process exited.
    ProcessExited { pid: u32, outcome: ProcessOutcome },
    /// The watch backend itself failed; unrecoverable.
    WatchFailed(WatchError),
    /// Operator interrupt; begin graceful shutdown.
    ShutdownRequested,
}

/// The supervision runtime.
///
/// Owns the current watch set and the tracked-process slot. Both are only
/// ever mutated here; producer tasks signal it through the event channel and
/// never touch shared state, so no locks are needed.
pub struct Runtime {
    config: Config,
    resolver: Resolver,

    watcher: Option<WatcherHandle>,
    tracked: Option<TrackedProcess>,

    /// Unified event stream from all producers.
    events_rx: mpsc::Receiver<RuntimeEvent>,
    /// Kept so replacement watchers and processes feed the same stream.
    events_tx: mpsc::Sender<RuntimeEvent>,

    /// Set when an interrupt arrives mid-rebuild; honored once the iteration
    /// completes instead of interrupting it.
    pending_shutdown: bool,
}

impl Runtime {
    pub fn new(
        config: Config,
        resolver: Resolver,
        watcher: WatcherHandle,
        tracked: TrackedProcess,
        events_rx: mpsc::Receiver<RuntimeEvent>,
        events_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            config,
            resolver,
            watcher: Some(watcher),
            tracked: Some(tracked),
            events_rx,
            events_tx,
            pending_shutdown: false,
        }
    }

    /// Pid of the currently tracked process, if any.
    pub fn tracked_pid(&self) -> Option<u32> {
        self.tracked.as_ref().map(|p| p.pid())
    }

    /// Directories registered with the current watch set, if one is live.
    pub fn watched_dirs(&self) -> Option<&[PathBuf]> {
        self.watcher.as_ref().map(|w| w.dirs())
    }

    /// Receive the next runtime event.
    pub async fn next_event(&mut self) -> Option<RuntimeEvent> {
        self.events_rx.recv().await
    }

    /// Main event loop.
    ///
    /// Returns when shutdown completes, or with an error on an unrecoverable
    /// fault (watch backend failure, watch-set rebuild failure, kill
    /// failure mid-rebuild).
    pub async fn run(mut self) -> Result<()> {
        info!("watchrun runtime started");

        while let Some(event) = self.next_event().await {
            if !self.handle_event(event).await? {
                break;
            }
        }

        info!("watchrun runtime exiting");
        Ok(())
    }

    /// Service a single event; `Ok(false)` means the loop should end.
    pub async fn handle_event(&mut self, event: RuntimeEvent) -> Result<bool> {
        debug!(?event, "runtime received event");

        let keep_running = match event {
            RuntimeEvent::SourceChanged { path } => self.handle_source_change(path).await?,
            RuntimeEvent::ProcessExited { pid, outcome } => {
                self.handle_process_exit(pid, outcome)
            }
            RuntimeEvent::WatchFailed(err) => return Err(err.into()),
            RuntimeEvent::ShutdownRequested => {
                self.shutdown().await;
                false
            }
        };

        if keep_running && self.pending_shutdown {
            info!("servicing interrupt received during rebuild");
            self.shutdown().await;
            return Ok(false);
        }

        Ok(keep_running)
    }

    /// A watched file changed: rebuild, replace the watch set, restart.
    ///
    /// A failed build or a binary that won't start leaves the system idle in
    /// the watching state; the operator's next save is the retry.
    async fn handle_source_change(&mut self, path: PathBuf) -> Result<bool> {
        info!(?path, "source change detected; rebuilding");

        // The old instance must be fully gone before anything else happens,
        // or the fresh one races it for ports and other shared resources.
        if let Some(proc) = self.tracked.take() {
            let pid = proc.pid();
            proc.terminate()
                .await
                .with_context(|| format!("stopping process {pid} for rebuild"))?;
            self.drain_exit(pid).await?;
        }

        let deps = match self.resolver.resolve(&self.config.entry).await {
            Ok(deps) => deps,
            Err(err) => {
                warn!(error = %err, "build failed; waiting for the next change");
                return Ok(true);
            }
        };

        // Close the old watch set before its replacement goes live.
        drop(self.watcher.take());

        let watcher = watch::build_watch_set(
            self.config.root.clone(),
            &deps,
            self.config.recursive,
            self.events_tx.clone(),
        )
        .context("rebuilding the watch set")?;
        self.watcher = Some(watcher);

        self.start_process();
        Ok(true)
    }

    /// A process exited on its own: restart it, unless the event is stale.
    fn handle_process_exit(&mut self, pid: u32, outcome: ProcessOutcome) -> bool {
        match self.tracked.as_ref() {
            Some(tracked) if tracked.pid() == pid => {}
            _ => {
                debug!(pid, "ignoring exit event for an untracked process");
                return true;
            }
        }

        self.tracked = None;
        match outcome {
            ProcessOutcome::Clean => info!(pid, "process exited; restarting"),
            ProcessOutcome::Failed(code) => {
                warn!(pid, exit_code = code, "process exited with an error; restarting");
            }
        }

        self.start_process();
        true
    }

    /// Terminate the tracked process, close the watch set, end the loop.
    async fn shutdown(&mut self) {
        info!("shutting down");

        if let Some(proc) = self.tracked.take() {
            let pid = proc.pid();
            if let Err(err) = proc.terminate().await {
                warn!(pid, error = %err, "failed to stop process during shutdown");
            }
        }
        drop(self.watcher.take());

        info!("closed");
    }

    /// Wait for the exit event of a process we just terminated.
    ///
    /// Events arriving in the meantime are not lost: further source changes
    /// coalesce into the rebuild already under way, and an interrupt is
    /// remembered and honored once the iteration completes.
    async fn drain_exit(&mut self, pid: u32) -> Result<()> {
        loop {
            match self.events_rx.recv().await {
                Some(RuntimeEvent::ProcessExited { pid: exited, .. }) if exited == pid => {
                    debug!(pid, "terminated process drained");
                    return Ok(());
                }
                Some(RuntimeEvent::ProcessExited { pid: stale, .. }) => {
                    debug!(pid = stale, "ignoring stale exit event");
                }
                Some(RuntimeEvent::SourceChanged { path }) => {
                    debug!(?path, "source change coalesced into rebuild in progress");
                }
                Some(RuntimeEvent::ShutdownRequested) => {
                    self.pending_shutdown = true;
                }
                Some(RuntimeEvent::WatchFailed(err)) => return Err(err.into()),
                None => bail!("event channel closed while draining process {pid}"),
            }
        }
    }

    /// Try to start the built binary. A failure leaves the slot empty and
    /// the watch set live, so the next change can retry.
    fn start_process(&mut self) {
        match exec::start(self.resolver.binary(), self.events_tx.clone()) {
            Ok(proc) => self.tracked = Some(proc),
            Err(err) => {
                error!(error = %err, "failed to start process; still watching");
                self.tracked = None;
            }
        }
    }
}
