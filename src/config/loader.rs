// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{BuildTool, Config, ConfigFile, DEFAULT_ENTRY};
use crate::errors::ConfigError;

/// Load the optional config file named by `--config` and merge it with the
/// CLI flags.
///
/// A missing file is treated as an empty config; defaults apply.
pub fn load(args: &CliArgs) -> Result<Config, ConfigError> {
    let file = if args.config.exists() {
        load_from_path(&args.config)?
    } else {
        debug!(path = ?args.config, "no config file found; using defaults");
        ConfigFile::default()
    };
    Ok(merge(args, file))
}

/// Read and deserialize a config file from a given path.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(file)
}

/// Merge file values with CLI flags. Flags win; built-in defaults fill the
/// rest.
pub fn merge(args: &CliArgs, file: ConfigFile) -> Config {
    let defaults = BuildTool::default();
    let build = BuildTool {
        command: file
            .build
            .command
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.command),
        output: file.build.output.unwrap_or(defaults.output),
        manifest: file.build.manifest.unwrap_or(defaults.manifest),
        module_root_env: file
            .build
            .module_root_env
            .unwrap_or(defaults.module_root_env),
    };

    Config {
        root: file.root.unwrap_or_else(|| PathBuf::from(".")),
        recursive: args.recursive.or(file.recursive).unwrap_or(true),
        entry: args
            .entry
            .clone()
            .or(file.entry)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY)),
        build,
    }
}
