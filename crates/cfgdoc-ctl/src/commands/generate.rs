//! `cfgdoc generate`: write reference pages and print the site index.

use std::path::Path;

use anyhow::{bail, Context};
use cfgdoc_tooling::docs::{DocGenerator, DocSettings, ModuleFilter};
use cfgdoc_tooling::template_engine::TemplateEngine;

use super::MetadataSource;
use crate::cli_config::{expand_path, CliConfig};
use crate::output;
use crate::GenerateArgs;

pub(crate) fn handle_generate_command(args: GenerateArgs, config: &CliConfig) -> anyhow::Result<()> {
    if !args.target_dir.is_dir() {
        bail!(
            "Target directory '{}' does not exist or is not a directory",
            args.target_dir.display()
        );
    }

    let engine = match args
        .template
        .or_else(|| config.template.as_deref().map(expand_path))
    {
        Some(path) => load_template(&path)?,
        None => TemplateEngine::builtin().context("Failed to compile the built-in template")?,
    };

    let source = MetadataSource::load(args.metadata, config)?;
    source.report_findings();

    let relative_path = args
        .relative_path
        .as_deref()
        .unwrap_or_else(|| config.relative_path());
    let settings = DocSettings::new(&args.target_dir)
        .with_relative_path(relative_path)
        .with_namespace(source.namespace.clone())
        .with_module_filter(ModuleFilter::parse(&args.module));

    let summary = DocGenerator::new(engine, settings)
        .generate(&source.registry)
        .context("Documentation generation failed")?;

    if summary.is_empty() {
        output::warning(format!("No types found for module '{}'", args.module));
        return Ok(());
    }

    output::success(format!(
        "Generated {} documents in {} ({} written, {} unchanged)",
        summary.docs().len(),
        args.target_dir.display(),
        summary.written_count(),
        summary.unchanged_count()
    ));
    output::blank();
    output::header("Configuration reference index");
    output::plain(summary.render_index(config.index_prefix())?.trim_end());

    Ok(())
}

fn load_template(path: &Path) -> anyhow::Result<TemplateEngine> {
    tracing::debug!(path = %path.display(), "Using template file");
    TemplateEngine::from_file(path)
        .with_context(|| format!("Failed to load template '{}'", path.display()))
}
