// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Built-in defaults, matching a plain Go toolchain.
pub const DEFAULT_BUILD_COMMAND: &[&str] = &["go", "build", "-o", "./main"];
pub const DEFAULT_OUTPUT: &str = "./main";
pub const DEFAULT_MANIFEST: &str = "go.sum";
pub const DEFAULT_MODULE_ROOT_ENV: &str = "GOPATH";
pub const DEFAULT_ENTRY: &str = "main.go";

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root; this is the directory whose tree is watched.
    pub root: PathBuf,

    /// Whether the project root is watched recursively.
    pub recursive: bool,

    /// Entry point handed to the build command.
    pub entry: PathBuf,

    /// External build tool contract.
    pub build: BuildTool,
}

/// Description of the external build tool.
///
/// The build command is opaque to the supervisor: it is expected to leave a
/// binary at `output` and a dependency manifest at `manifest` as side
/// effects. Kept as plain data so tests can substitute a scripted tool.
#[derive(Debug, Clone)]
pub struct BuildTool {
    /// Command prefix; the entry path is appended as the final argument.
    pub command: Vec<String>,

    /// Path the build writes the binary to.
    pub output: PathBuf,

    /// Path the build writes the dependency manifest to.
    pub manifest: PathBuf,

    /// Environment variable naming the module root directory.
    pub module_root_env: String,
}

impl Default for BuildTool {
    fn default() -> Self {
        Self {
            command: DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            module_root_env: DEFAULT_MODULE_ROOT_ENV.to_string(),
        }
    }
}

/// Optional `Watchrun.toml` contents.
///
/// Everything here is optional; missing values fall back to CLI flags and
/// built-in defaults (see `config::loader`).
///
/// ```toml
/// root = "."
/// recursive = false
/// entry = "cmd/server/main.go"
///
/// [build]
/// command = ["go", "build", "-o", "./main"]
/// output = "./main"
/// manifest = "go.sum"
/// module_root_env = "GOPATH"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub recursive: Option<bool>,

    #[serde(default)]
    pub entry: Option<PathBuf>,

    #[serde(default)]
    pub build: BuildSection,
}

/// `[build]` section: overrides for the build tool contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSection {
    #[serde(default)]
    pub command: Option<Vec<String>>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub manifest: Option<PathBuf>,

    #[serde(default)]
    pub module_root_env: Option<String>,
}
