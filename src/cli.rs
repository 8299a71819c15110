// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Command-line arguments for `watchrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchrun",
    version,
    about = "Rebuild and restart a program whenever its sources change.",
    long_about = None
)]
pub struct CliArgs {
    /// Watch the project root recursively (default: true).
    ///
    /// Dependency directories are always watched recursively, regardless of
    /// this flag.
    #[arg(short = 'r', long, value_name = "BOOL", action = ArgAction::Set)]
    pub recursive: Option<bool>,

    /// Entry point handed to the build command (default: `main.go`).
    #[arg(short = 'e', long, value_name = "PATH")]
    pub entry: Option<PathBuf>,

    /// Path to an optional config file (TOML).
    ///
    /// Default: `Watchrun.toml` in the current working directory. A missing
    /// file is not an error; built-in defaults apply.
    #[arg(long, value_name = "PATH", default_value = "Watchrun.toml")]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
