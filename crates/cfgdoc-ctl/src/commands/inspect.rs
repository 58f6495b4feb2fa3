//! `cfgdoc inspect`: print the resolved options of one type.

use anyhow::anyhow;
use cfgdoc_tooling::classifier::{OutputDocuments, TypeClassifier};
use cfgdoc_tooling::metadata::ConfiguredType;
use cfgdoc_tooling::registry::TypeRegistry;

use super::MetadataSource;
use crate::cli_config::CliConfig;
use crate::output;
use crate::InspectArgs;

pub(crate) fn handle_inspect_command(args: InspectArgs, config: &CliConfig) -> anyhow::Result<()> {
    let source = MetadataSource::load(args.metadata, config)?;
    let ty = find_type(&source.registry, &args.type_name).ok_or_else(|| {
        anyhow!(
            "Type '{}' not found in metadata under {:?}",
            args.type_name,
            source.search_paths
        )
    })?;

    let mut options = ty.options.clone();
    options.sort_by(|a, b| a.key.cmp(&b.key));
    // No output directory: every cross-reference renders as plain text
    let documents = OutputDocuments::new(None);
    let classifier = TypeClassifier::new(
        &source.registry,
        &source.namespace,
        &documents,
        config.relative_path(),
    );
    classifier.classify_all(&mut options);

    output::header(&ty.title);
    output::label("Type", &ty.type_name);
    if ty.annotated_type() != ty.type_name {
        output::label("Annotated type", ty.annotated_type());
    }
    if let Some(prefix) = &ty.prefix {
        output::label("Prefix", prefix);
    }
    if !ty.provides.is_empty() {
        output::label("Provides", ty.provides.join(", "));
    }
    output::blank();

    if options.is_empty() {
        output::dim("  (no options)");
    }
    for option in &options {
        let mut line = format!(
            "{} : {}",
            option.key,
            option.ref_type.as_deref().unwrap_or(&option.value_type)
        );
        if let Some(default) = &option.default_value {
            line.push_str(&format!(" = {default}"));
        }
        if option.required {
            line.push_str(" (required)");
        }
        if option.merge {
            line.push_str(" (unresolved merge)");
        }
        output::item(line);
    }

    for finding in source
        .report
        .findings
        .iter()
        .filter(|f| f.type_name == ty.type_name)
    {
        output::warning(&finding.message);
    }
    Ok(())
}

/// Look up by registry key first, then by either identity.
fn find_type<'a>(registry: &'a TypeRegistry, name: &str) -> Option<&'a ConfiguredType> {
    registry.lookup(name).or_else(|| {
        registry
            .indexed_types()
            .find(|ty| ty.type_name == name || ty.annotated_type() == name)
    })
}
