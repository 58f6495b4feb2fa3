//! Option display text and type titles.
//!
//! Every option's value type is rendered once, by the first matching rule:
//!
//! 1. primitive alias (`string`, `int`, ...)
//! 2. the opaque config node type, as a fixed `map<string, string>` placeholder
//! 3. allowed values, `Kind (v1, v2)`
//! 4. service provider interface, followed by the known implementations
//! 5. cross-reference to the type's document, if that document exists
//! 6. plain display label
//!
//! Whether a document exists is answered by a [`DocumentIndex`], so the same registry and
//! the same index always classify to the same text.

mod names;

pub use names::{
    by_kind, display_label, doc_file_name, primitive_alias, RootNamespace, DOC_EXTENSION,
};

use std::collections::HashSet;
use std::path::PathBuf;

use crate::metadata::ConfigOption;
use crate::registry::TypeRegistry;

/// Display text of the opaque config node type.
pub const CONFIG_PLACEHOLDER: &str = "map<string, string>";

const PROVIDER_SUFFIX: &str = "(service provider interface)";

/// Answers whether a document with a given file name exists or will exist.
pub trait DocumentIndex {
    fn has_document(&self, file_name: &str) -> bool;
}

/// Documents planned for this run plus whatever is already in the output directory.
#[derive(Debug, Default)]
pub struct OutputDocuments {
    planned: HashSet<String>,
    output_dir: Option<PathBuf>,
}

impl OutputDocuments {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            planned: HashSet::new(),
            output_dir,
        }
    }

    /// Record a document this run will produce.
    pub fn plan(&mut self, file_name: impl Into<String>) {
        self.planned.insert(file_name.into());
    }

    pub fn planned_count(&self) -> usize {
        self.planned.len()
    }
}

impl DocumentIndex for OutputDocuments {
    fn has_document(&self, file_name: &str) -> bool {
        self.planned.contains(file_name)
            || self
                .output_dir
                .as_ref()
                .is_some_and(|dir| dir.join(file_name).is_file())
    }
}

/// Computes option display text against a resolved registry.
#[derive(Debug)]
pub struct TypeClassifier<'a, D> {
    registry: &'a TypeRegistry,
    namespace: &'a RootNamespace,
    documents: &'a D,
    relative_path: &'a str,
}

impl<'a, D: DocumentIndex> TypeClassifier<'a, D> {
    /// `relative_path` prefixes every cross-reference target and should end with `/`.
    pub fn new(
        registry: &'a TypeRegistry,
        namespace: &'a RootNamespace,
        documents: &'a D,
        relative_path: &'a str,
    ) -> Self {
        Self {
            registry,
            namespace,
            documents,
            relative_path,
        }
    }

    /// Display text for one option.
    pub fn classify(&self, option: &ConfigOption) -> String {
        let value_type = option.value_type.as_str();

        if let Some(alias) = primitive_alias(value_type) {
            return by_kind(option.kind, alias);
        }
        if value_type == self.namespace.config_type() {
            return CONFIG_PLACEHOLDER.to_string();
        }

        let label = by_kind(option.kind, &display_label(value_type));

        if let Some(values) = option.allowed_values() {
            let values: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
            return format!("{label} ({})", values.join(", "));
        }
        if option.provider {
            return self.provider_text(option);
        }
        if self.namespace.contains(value_type) {
            return self.link_if_documented(value_type, &label);
        }
        label
    }

    /// Set `ref_type` on every option.
    pub fn classify_all(&self, options: &mut [ConfigOption]) {
        for option in options {
            option.ref_type = Some(self.classify(option));
        }
    }

    /// Implementations of `interface` among the indexed types, one rendered line each,
    /// ordered by label.
    pub fn providers_of(&self, interface: &str) -> Vec<String> {
        let mut providers: Vec<(String, String)> = self
            .registry
            .indexed_types()
            .filter(|ty| ty.provides.iter().any(|provided| provided == interface))
            .map(|ty| {
                let label = display_label(&ty.type_name);
                let shown = self.link_if_documented(&ty.type_name, &label);
                let line = match &ty.prefix {
                    Some(prefix) => format!("{shown} ({prefix})"),
                    None => shown,
                };
                (label, line)
            })
            .collect();
        providers.sort();
        providers.into_iter().map(|(_, line)| line).collect()
    }

    fn provider_text(&self, option: &ConfigOption) -> String {
        let mut text = format!(
            "{} {PROVIDER_SUFFIX}",
            by_kind(option.kind, &option.value_type)
        );
        let providers = self.providers_of(option.provider_interface());
        if !providers.is_empty() {
            text.push_str("\n\nSuch as:\n");
            for provider in providers {
                text.push_str("\n* ");
                text.push_str(&provider);
            }
        }
        text
    }

    fn link_if_documented(&self, type_name: &str, label: &str) -> String {
        let file_name = doc_file_name(type_name);
        if self.documents.has_document(&file_name) {
            format!(
                "xref:{}{file_name}[{}]",
                self.relative_path,
                label.replace(']', "\\]")
            )
        } else {
            label.to_string()
        }
    }
}

/// Assign titles and javadoc references to every type in the registry.
pub fn assign_titles(registry: &mut TypeRegistry, namespace: &RootNamespace) {
    let ids: Vec<_> = registry.all_ids().collect();
    for id in ids {
        let ty = registry.get_mut(id);
        ty.title = namespace.title(&ty.type_name);
        ty.type_reference = namespace.type_reference(&ty.type_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{parse_metadata_str, AllowedValue, OptionKind};
    use crate::registry::RegistryKey;

    struct Documents(Vec<&'static str>);

    impl DocumentIndex for Documents {
        fn has_document(&self, file_name: &str) -> bool {
            self.0.iter().any(|doc| *doc == file_name)
        }
    }

    fn option(value_type: &str, kind: OptionKind) -> ConfigOption {
        let mut option: ConfigOption = serde_json::from_str(r#"{"key": "k"}"#).unwrap();
        option.value_type = value_type.to_string();
        option.kind = kind;
        option
    }

    fn registry() -> TypeRegistry {
        TypeRegistry::from_modules(
            parse_metadata_str(
                r#"[{"module": "io.root.tracing", "types": [
                  {"type": "io.root.tracing.Tracer"},
                  {"type": "io.root.tracing.zipkin.ZipkinTracer", "prefix": "zipkin",
                   "provides": ["io.root.tracing.spi.TracerProvider"]},
                  {"type": "vendor.jaeger.JaegerTracer", "prefix": "jaeger",
                   "provides": ["io.root.tracing.spi.TracerProvider"]},
                  {"type": "vendor.Other", "provides": ["something.Else"]}
                ]}]"#,
            )
            .unwrap(),
            RegistryKey::Type,
        )
    }

    fn classify(option: &ConfigOption, documents: &Documents) -> String {
        let registry = registry();
        let namespace = RootNamespace::new("io.root");
        TypeClassifier::new(&registry, &namespace, documents, "{rootdir}/config/").classify(option)
    }

    #[test]
    fn test_primitive_alias_by_kind() {
        let none = Documents(vec![]);
        assert_eq!(classify(&option("java.lang.String", OptionKind::Value), &none), "string");
        assert_eq!(classify(&option("java.lang.Long", OptionKind::List), &none), "long[]");
        assert_eq!(
            classify(&option("java.lang.Boolean", OptionKind::Map), &none),
            "map<string, boolean>"
        );
    }

    #[test]
    fn test_config_type_is_fixed_placeholder() {
        let docs = Documents(vec!["io_root_config_Config.adoc"]);
        let mut config = option("io.root.config.Config", OptionKind::List);
        config.provider = true;
        config.merge = true;
        assert_eq!(classify(&config, &docs), "map<string, string>");
    }

    #[test]
    fn test_allowed_values_in_declared_order() {
        let mut mode = option("io.root.cache.Mode", OptionKind::Value);
        mode.allowed_values = Some(vec![
            AllowedValue {
                value: "LRU".into(),
                description: String::new(),
            },
            AllowedValue {
                value: "FIFO".into(),
                description: String::new(),
            },
        ]);
        assert_eq!(classify(&mode, &Documents(vec![])), "Mode (LRU, FIFO)");
    }

    #[test]
    fn test_provider_lists_implementations() {
        let docs = Documents(vec!["io_root_tracing_zipkin_ZipkinTracer.adoc"]);
        let mut tracer = option("io.root.tracing.Tracer", OptionKind::Value);
        tracer.provider = true;
        tracer.provider_type = Some("io.root.tracing.spi.TracerProvider".into());

        assert_eq!(
            classify(&tracer, &docs),
            "io.root.tracing.Tracer (service provider interface)\n\nSuch as:\n\
             \n* JaegerTracer (jaeger)\
             \n* xref:{rootdir}/config/io_root_tracing_zipkin_ZipkinTracer.adoc[ZipkinTracer] (zipkin)"
        );
    }

    #[test]
    fn test_provider_without_implementations() {
        let mut provider = option("io.root.security.spi.Provider", OptionKind::List);
        provider.provider = true;
        assert_eq!(
            classify(&provider, &Documents(vec![])),
            "io.root.security.spi.Provider[] (service provider interface)"
        );
    }

    #[test]
    fn test_own_type_links_only_when_documented() {
        let pool = option("io.root.common.Pool.Builder", OptionKind::List);
        assert_eq!(classify(&pool, &Documents(vec![])), "Pool.Builder[]");
        assert_eq!(
            classify(&pool, &Documents(vec!["io_root_common_Pool_Builder.adoc"])),
            "xref:{rootdir}/config/io_root_common_Pool_Builder.adoc[Pool.Builder[\\]]"
        );
    }

    #[test]
    fn test_foreign_type_is_plain_label() {
        let docs = Documents(vec!["java_time_Duration.adoc"]);
        assert_eq!(classify(&option("java.time.Duration", OptionKind::Value), &docs), "Duration");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let docs = Documents(vec!["io_root_tracing_zipkin_ZipkinTracer.adoc"]);
        let mut tracer = option("io.root.tracing.Tracer", OptionKind::Value);
        tracer.provider = true;
        tracer.provider_type = Some("io.root.tracing.spi.TracerProvider".into());
        assert_eq!(classify(&tracer, &docs), classify(&tracer, &docs));
    }

    #[test]
    fn test_output_documents_consults_plan_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("on_disk.adoc"), "existing").unwrap();

        let mut documents = OutputDocuments::new(Some(dir.path().to_path_buf()));
        documents.plan("planned.adoc");

        assert!(documents.has_document("planned.adoc"));
        assert!(documents.has_document("on_disk.adoc"));
        assert!(!documents.has_document("missing.adoc"));
        assert_eq!(documents.planned_count(), 1);
    }

    #[test]
    fn test_assign_titles() {
        let mut registry = registry();
        assign_titles(&mut registry, &RootNamespace::new("io.root"));

        let tracer = registry.lookup("io.root.tracing.Tracer").unwrap();
        assert_eq!(tracer.title, "Tracer (tracing)");
        assert!(tracer.type_reference.starts_with("link:{javadoc-base-url}/io.root.tracing/"));
        assert_eq!(
            registry.lookup("vendor.jaeger.JaegerTracer").unwrap().title,
            "vendor.jaeger.JaegerTracer"
        );
    }
}
