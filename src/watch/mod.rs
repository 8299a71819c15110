// src/watch/mod.rs

//! Watch-set construction and change notification.
//!
//! This module turns a project root plus the current dependency directories
//! into a live `notify` watch set, and forwards create/write/remove events
//! into the runtime. It does **not** know about builds or processes; it only
//! produces `RuntimeEvent::SourceChanged` (and the fatal `WatchFailed`).

pub mod watcher;

pub use watcher::{build_watch_set, WatcherHandle};
