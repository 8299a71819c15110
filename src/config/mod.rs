// src/config/mod.rs

//! Startup configuration.
//!
//! Three layers, in increasing precedence: built-in defaults, an optional
//! `Watchrun.toml`, CLI flags. The merged [`Config`] is created once at
//! startup and never mutated afterwards.

pub mod loader;
pub mod model;

pub use loader::{load, load_from_path, merge};
pub use model::{
    BuildSection, BuildTool, Config, ConfigFile, DEFAULT_BUILD_COMMAND, DEFAULT_ENTRY,
    DEFAULT_MANIFEST, DEFAULT_MODULE_ROOT_ENV, DEFAULT_OUTPUT,
};
