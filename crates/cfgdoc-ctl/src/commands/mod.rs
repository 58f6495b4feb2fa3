//! Command handlers for the cfgdoc CLI
//!
//! Each module handles one subcommand, delegating resolution and rendering to
//! `cfgdoc-tooling`.

pub(crate) mod generate;
pub(crate) mod inspect;

pub(crate) use generate::handle_generate_command;
pub(crate) use inspect::handle_inspect_command;

use std::path::PathBuf;

use anyhow::Context;
use cfgdoc_tooling::classifier::RootNamespace;
use cfgdoc_tooling::docs::prepare_registry;
use cfgdoc_tooling::metadata::load_modules;
use cfgdoc_tooling::registry::TypeRegistry;
use cfgdoc_tooling::resolver::ResolutionReport;

use crate::cli_config::{expand_path, CliConfig};
use crate::MetadataArgs;

/// Metadata options after applying config file defaults.
#[derive(Debug)]
pub(crate) struct MetadataSource {
    pub search_paths: Vec<PathBuf>,
    pub namespace: RootNamespace,
    pub registry: TypeRegistry,
    pub report: ResolutionReport,
}

impl MetadataSource {
    /// Load every metadata document and run all resolution passes.
    pub(crate) fn load(args: MetadataArgs, config: &CliConfig) -> anyhow::Result<Self> {
        let search_paths = if !args.metadata.is_empty() {
            args.metadata
        } else if !config.metadata_paths.is_empty() {
            config.metadata_paths.iter().map(|p| expand_path(p)).collect()
        } else {
            vec![PathBuf::from(".")]
        };
        let namespace = args
            .root_namespace
            .or_else(|| config.root_namespace.clone())
            .map(RootNamespace::new)
            .unwrap_or_default();
        let key = args
            .registry_key
            .or(config.registry_key)
            .unwrap_or_default();

        let modules = load_modules(&search_paths).context("Failed to load configuration metadata")?;
        tracing::info!(modules = modules.len(), ?search_paths, "Loaded configuration metadata");

        let mut registry = TypeRegistry::from_modules(modules, key);
        if registry.is_empty() {
            tracing::warn!(?search_paths, "No configured types found in metadata");
        } else {
            tracing::debug!(types = registry.len(), %key, "Registered configured types");
        }
        let report = prepare_registry(&mut registry, &namespace);

        Ok(Self {
            search_paths,
            namespace,
            registry,
            report,
        })
    }

    /// Send every resolution finding to the log, keeping stdout for the summary.
    pub(crate) fn report_findings(&self) {
        self.report.log();
    }
}
