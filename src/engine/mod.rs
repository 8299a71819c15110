// src/engine/mod.rs

//! Orchestration engine.
//!
//! A single runtime task consumes every event the system produces:
//! - source changes from the watch forwarding task
//! - process exits from the per-process waiter tasks
//! - shutdown from the Ctrl-C listener
//!
//! Servicing exactly one event per iteration is what keeps rebuilds,
//! restarts and shutdown from interleaving: within a rebuild, the old
//! process is fully gone before the new watch set is installed, and the new
//! watch set is live before the new process starts.

pub mod runtime;

pub use runtime::{ProcessOutcome, Runtime, RuntimeEvent};
