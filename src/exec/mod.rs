// src/exec/mod.rs

//! Process lifecycle tracking.
//!
//! Starting the built binary hands back a [`TrackedProcess`]; a background
//! waiter task owns the child, reports its exit on the shared runtime
//! channel, and services kill requests. A crashed child is an ordinary
//! lifecycle event here, never a supervisor failure.

pub mod supervisor;

pub use supervisor::{start, TrackedProcess};
