// src/build/resolver.rs

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

use crate::build::manifest::parse_manifest;
use crate::config::{BuildTool, Config};
use crate::errors::BuildError;

/// Subdirectory of the module root that dependency sources live under.
const MODULE_SRC_DIR: &str = "src";

/// Runs the build command and resolves dependency directories from the
/// manifest it produces.
#[derive(Debug, Clone)]
pub struct Resolver {
    tool: BuildTool,
    module_root: PathBuf,
}

impl Resolver {
    /// Build a resolver from configuration, reading the module root from the
    /// configured environment variable.
    pub fn from_config(config: &Config) -> Result<Self, BuildError> {
        let base = env::var(&config.build.module_root_env)
            .map_err(|_| BuildError::MissingModuleRoot(config.build.module_root_env.clone()))?;
        Ok(Self::new(
            config.build.clone(),
            PathBuf::from(base).join(MODULE_SRC_DIR),
        ))
    }

    /// Build a resolver with an explicit module root.
    pub fn new(tool: BuildTool, module_root: PathBuf) -> Self {
        Self { tool, module_root }
    }

    /// Path the build tool writes the binary to.
    pub fn binary(&self) -> &Path {
        &self.tool.output
    }

    /// Run the build command for `entry`, then parse the manifest into the
    /// ordered list of dependency directories.
    ///
    /// The command's stdout/stderr go straight to the operator's terminal so
    /// compile errors stay visible. The manifest is read, never written.
    pub async fn resolve(&self, entry: &Path) -> Result<Vec<PathBuf>, BuildError> {
        let Some((program, args)) = self.tool.command.split_first() else {
            return Err(BuildError::Invoke {
                command: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty build command"),
            });
        };

        debug!(command = ?self.tool.command, entry = ?entry, "running build command");
        let status = Command::new(program)
            .args(args)
            .arg(entry)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| BuildError::Invoke {
                command: self.tool.command.join(" "),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::Failed { status });
        }

        let contents = fs::read_to_string(&self.tool.manifest)
            .await
            .map_err(|source| BuildError::Manifest {
                path: self.tool.manifest.clone(),
                source,
            })?;

        let deps: Vec<PathBuf> = parse_manifest(&contents)
            .map(|entry| self.module_root.join(entry.module))
            .collect();

        info!(deps = deps.len(), "build succeeded");
        Ok(deps)
    }
}
