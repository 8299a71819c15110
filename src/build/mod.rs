// src/build/mod.rs

//! Build invocation and dependency resolution.
//!
//! The build tool is an opaque command: it leaves a binary at a known output
//! path and a dependency manifest at a known path as side effects. This
//! module only runs the command and inspects the manifest, turning each
//! entry into a module directory that must also be watched.
//!
//! - [`resolver`] owns the build invocation and the module-root lookup.
//! - [`manifest`] is the line-oriented parser for the dependency manifest.

pub mod manifest;
pub mod resolver;

pub use manifest::{parse_manifest, ManifestEntry};
pub use resolver::Resolver;
