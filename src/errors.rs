// src/errors.rs

//! Typed error taxonomy for the supervisor.
//!
//! Recoverable errors (a failed build, a binary that refuses to start) are
//! absorbed and logged at the runtime boundary; everything else bubbles up
//! as `anyhow::Error` and terminates the program.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors from build invocation and dependency resolution.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The module-root environment variable is not set.
    #[error("required environment variable {0} is not set")]
    MissingModuleRoot(String),

    /// The build command could not be invoked at all.
    #[error("failed to invoke build command {command:?}")]
    Invoke {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The build command ran and exited non-zero.
    #[error("build command exited with {status}")]
    Failed { status: ExitStatus },

    /// The dependency manifest could not be read.
    #[error("failed to read dependency manifest {path:?}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors from watch-set construction.
///
/// Always fatal to the supervisor: watching is its sole reason to exist.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to create filesystem watcher")]
    Backend(#[source] notify::Error),

    #[error("failed to enumerate directories under {path:?}")]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to register {path:?} with the filesystem watcher")]
    Register {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Errors from process lifecycle tracking.
#[derive(Debug, Error)]
pub enum SuperviseError {
    /// The built binary could not be started.
    #[error("failed to start {binary:?}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Termination was requested but the process had already exited.
    #[error("process {pid} is no longer running")]
    AlreadyExited { pid: u32 },

    /// The kill call itself failed.
    #[error("failed to kill process {pid}")]
    Kill {
        pid: u32,
        #[source]
        source: io::Error,
    },
}

/// Errors from config file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
