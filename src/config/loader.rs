// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ProjdagError, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PROJDAG_CONFIG";
/// Environment variable naming the graph file.
pub const GRAPH_ENV: &str = "PROJDAG_GRAPH";

const STATE_DIR: &str = ".projdag";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for the
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        ProjdagError::ConfigError(format!("reading config file at {:?}: {e}", path))
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve and load the effective configuration.
///
/// Priority:
/// 1. `explicit` (the `--config` flag); must exist
/// 2. `PROJDAG_CONFIG`; must exist
/// 3. `~/.projdag/config.toml`, if present
/// 4. built-in defaults
pub fn load_effective(explicit: Option<&Path>) -> Result<ConfigFile> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = named {
        let path = expand_home(&path);
        debug!(path = %path.display(), "loading config");
        return load_and_validate(&path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "loading default config");
            load_and_validate(&path)
        }
        _ => {
            debug!("no config file; using defaults");
            Ok(ConfigFile::default())
        }
    }
}

/// Pick the graph file: `--graph` flag, then `PROJDAG_GRAPH`, then
/// `[storage].graph_file`, then `~/.projdag/graph.json`.
pub fn resolve_graph_path(explicit: Option<&Path>, cfg: &ConfigFile) -> PathBuf {
    let chosen = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(GRAPH_ENV).map(PathBuf::from))
        .or_else(|| cfg.storage.graph_file.clone());

    match chosen {
        Some(path) => expand_home(&path),
        None => state_dir().join("graph.json"),
    }
}

/// `~/.projdag/config.toml`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(STATE_DIR).join("config.toml"))
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

fn state_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(STATE_DIR),
        None => PathBuf::from(STATE_DIR),
    }
}
