// src/exec/supervisor.rs

use std::io;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::engine::{ProcessOutcome, RuntimeEvent};
use crate::errors::SuperviseError;

/// Kill request handshake between [`TrackedProcess::terminate`] and the
/// waiter task.
struct KillRequest {
    ack: oneshot::Sender<io::Result<()>>,
}

/// The single child process currently considered current.
///
/// The child itself lives in its waiter task; this handle carries only the
/// pid and the kill channel. The exit is reported on the runtime channel as
/// `ProcessExited`, exactly once, whether the exit was clean, a crash, or
/// induced by [`TrackedProcess::terminate`].
pub struct TrackedProcess {
    pid: u32,
    kill_tx: oneshot::Sender<KillRequest>,
}

impl std::fmt::Debug for TrackedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedProcess")
            .field("pid", &self.pid)
            .finish()
    }
}

impl TrackedProcess {
    /// Pid of the tracked child.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Forcibly terminate the child and wait for the kill to be carried out.
    ///
    /// Consuming `self` clears the tracked slot. The waiter still emits the
    /// ordinary `ProcessExited` event afterwards, which the caller must
    /// drain before starting a replacement.
    pub async fn terminate(self) -> Result<(), SuperviseError> {
        info!(pid = self.pid, "stopping process");

        let (ack_tx, ack_rx) = oneshot::channel();
        self.kill_tx
            .send(KillRequest { ack: ack_tx })
            .map_err(|_| SuperviseError::AlreadyExited { pid: self.pid })?;

        match ack_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(SuperviseError::Kill {
                pid: self.pid,
                source,
            }),
            Err(_) => Err(SuperviseError::AlreadyExited { pid: self.pid }),
        }
    }
}

/// Launch `binary` and begin tracking it.
///
/// stdout/stderr are inherited, so the program writes straight to the
/// operator's terminal. The returned handle's exit will arrive on
/// `runtime_tx` from a background waiter task.
pub fn start(
    binary: &Path,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<TrackedProcess, SuperviseError> {
    let mut child = Command::new(binary)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| SuperviseError::Spawn {
            binary: binary.to_path_buf(),
            source,
        })?;

    let pid = child.id().unwrap_or(0);
    let (kill_tx, kill_rx) = oneshot::channel::<KillRequest>();

    tokio::spawn(async move {
        let status = tokio::select! {
            status = child.wait() => status,
            req = kill_rx => {
                if let Ok(KillRequest { ack }) = req {
                    let _ = ack.send(child.kill().await);
                }
                // Handle dropped without a kill request: keep waiting.
                child.wait().await
            }
        };

        let outcome = match status {
            Ok(status) if status.success() => {
                info!(pid, "process exited cleanly");
                ProcessOutcome::Clean
            }
            Ok(status) => {
                let code = status.code().unwrap_or(-1);
                warn!(pid, exit_code = code, "process exited with an error");
                ProcessOutcome::Failed(code)
            }
            Err(err) => {
                error!(pid, error = %err, "failed to await process exit");
                ProcessOutcome::Failed(-1)
            }
        };

        if runtime_tx
            .send(RuntimeEvent::ProcessExited { pid, outcome })
            .await
            .is_err()
        {
            debug!(pid, "runtime gone before exit could be reported");
        }
    });

    info!(pid, binary = ?binary, "process is running");
    Ok(TrackedProcess { pid, kill_tx })
}
