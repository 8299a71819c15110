// src/lib.rs

pub mod build;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod watch;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;

use crate::build::Resolver;
use crate::cli::CliArgs;
use crate::engine::{Runtime, RuntimeEvent};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the dependency resolver and the initial build
/// - the initial watch set and process
/// - Ctrl-C handling
/// - the runtime event loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::load(&args)?;
    let resolver = Resolver::from_config(&cfg)?;

    // Startup failures are fatal: there is nothing to supervise until the
    // first build, watch set and process all exist.
    let deps = resolver
        .resolve(&cfg.entry)
        .await
        .context("initial build")?;

    let (events_tx, events_rx) = mpsc::channel::<RuntimeEvent>(64);

    let watcher = watch::build_watch_set(
        cfg.root.clone(),
        &deps,
        cfg.recursive,
        events_tx.clone(),
    )
    .context("initial watch set")?;

    let tracked = exec::start(resolver.binary(), events_tx.clone())
        .context("starting the built binary")?;

    spawn_interrupt_listener(events_tx.clone());

    let runtime = Runtime::new(cfg, resolver, watcher, tracked, events_rx, events_tx);
    runtime.run().await
}

/// Ctrl-C → graceful shutdown. Listens exactly once per program lifetime.
fn spawn_interrupt_listener(tx: mpsc::Sender<RuntimeEvent>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        info!("got interrupt signal");
        let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
    });
}
