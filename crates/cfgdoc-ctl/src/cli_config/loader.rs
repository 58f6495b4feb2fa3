//! Config file discovery and loading for `.cfgdoc.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.cfgdoc.toml` (project-local)
//! 2. `~/.config/cfgdoc.toml` (user-global)

use std::path::PathBuf;

use super::CliConfig;

const CONFIG_FILENAME: &str = ".cfgdoc.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "cfgdoc.toml";

/// Load CLI config from the first discovered location, or return defaults.
pub(crate) fn load_cli_config() -> CliConfig {
    if let Some(path) = find_config_file() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded CLI config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse CLI config, using defaults");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read CLI config, using defaults");
            }
        }
    }
    CliConfig::default()
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

/// Expand a configured path, resolving `~` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
