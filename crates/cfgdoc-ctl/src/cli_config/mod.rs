//! CLI configuration: metadata locations and generation defaults.
//!
//! Every field is optional; command-line flags take precedence over the file.

pub(crate) mod loader;

pub(crate) use loader::{expand_path, load_cli_config};

use cfgdoc_tooling::docs::DEFAULT_RELATIVE_PATH;
use cfgdoc_tooling::registry::RegistryKey;
use serde::Deserialize;

/// Contents of `.cfgdoc.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Files or directories searched for `config-metadata.json`.
    #[serde(default)]
    pub metadata_paths: Vec<String>,

    /// Tera template replacing the built-in page template.
    pub template: Option<String>,

    /// Root namespace of documented types. Default: `io.helidon`.
    pub root_namespace: Option<String>,

    /// Prefix of cross-reference targets. Default: `{rootdir}/config/`.
    pub relative_path: Option<String>,

    /// Prefix of index entries. Default: `{rootdir}/config/`.
    pub index_prefix: Option<String>,

    /// Identity types are registered under. Default: `annotated-type`.
    pub registry_key: Option<RegistryKey>,
}

impl CliConfig {
    pub(crate) fn relative_path(&self) -> &str {
        self.relative_path.as_deref().unwrap_or(DEFAULT_RELATIVE_PATH)
    }

    pub(crate) fn index_prefix(&self) -> &str {
        self.index_prefix.as_deref().unwrap_or(DEFAULT_RELATIVE_PATH)
    }
}
