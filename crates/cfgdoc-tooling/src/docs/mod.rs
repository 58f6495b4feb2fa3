//! Renderer driver: one document per selected type, written only when its content changed.
//!
//! [`prepare_registry`] runs every registry-wide pass (description translation, inheritance
//! and merge resolution, titles). [`DocGenerator::generate`] then renders each selected
//! type against the resolved registry. All modules take part in resolution and
//! cross-referencing; the [`ModuleFilter`] only decides which ones get documents.

mod copyright;
mod index;

pub use copyright::{current_year, year_range, year_range_for};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::{
    assign_titles, doc_file_name, OutputDocuments, RootNamespace, TypeClassifier,
};
use crate::description::translate_descriptions;
use crate::metadata::ConfiguredType;
use crate::registry::{RegisteredModule, TypeRegistry};
use crate::resolver::{resolve_all, ResolutionReport};
use crate::template_engine::{DocumentRenderer, EngineError, RenderContext};

/// Default prefix of cross-reference targets and index entries.
pub const DEFAULT_RELATIVE_PATH: &str = "{rootdir}/config/";

/// Run every pass that must complete before rendering.
pub fn prepare_registry(registry: &mut TypeRegistry, namespace: &RootNamespace) -> ResolutionReport {
    translate_descriptions(registry);
    let report = resolve_all(registry);
    assign_titles(registry, namespace);
    report
}

/// Which modules get documents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModuleFilter {
    #[default]
    All,
    Exact(String),
}

impl ModuleFilter {
    /// `*` selects every module, anything else exactly one.
    pub fn parse(value: &str) -> Self {
        if value == "*" {
            Self::All
        } else {
            Self::Exact(value.to_string())
        }
    }

    pub fn matches(&self, module: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(name) => name == module,
        }
    }
}

/// Output settings for one generation run.
#[derive(Debug, Clone)]
pub struct DocSettings {
    pub output_dir: PathBuf,
    /// Prefix of cross-reference targets, ending with `/`.
    pub relative_path: String,
    pub namespace: RootNamespace,
    pub module_filter: ModuleFilter,
    pub current_year: i32,
}

impl DocSettings {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            relative_path: DEFAULT_RELATIVE_PATH.to_string(),
            namespace: RootNamespace::default(),
            module_filter: ModuleFilter::All,
            current_year: current_year(),
        }
    }

    /// Set the cross-reference prefix, appending a trailing `/` when missing.
    pub fn with_relative_path(mut self, relative_path: &str) -> Self {
        self.relative_path = if relative_path.ends_with('/') {
            relative_path.to_string()
        } else {
            format!("{relative_path}/")
        };
        self
    }

    pub fn with_namespace(mut self, namespace: RootNamespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_module_filter(mut self, module_filter: ModuleFilter) -> Self {
        self.module_filter = module_filter;
        self
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }
}

/// One document produced (or confirmed unchanged) by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDoc {
    pub file_name: String,
    pub title: String,
    /// False when the existing file already had identical content.
    pub written: bool,
}

/// Every document of a run, one entry per file name.
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    docs: Vec<GeneratedDoc>,
}

impl GenerationSummary {
    fn record(&mut self, file_name: String, title: String, written: bool) {
        if let Some(existing) = self.docs.iter_mut().find(|d| d.file_name == file_name) {
            existing.title = title;
            existing.written |= written;
        } else {
            self.docs.push(GeneratedDoc {
                file_name,
                title,
                written,
            });
        }
    }

    /// Whether a document with this file name was already produced in this run.
    pub fn contains(&self, file_name: &str) -> bool {
        self.docs.iter().any(|d| d.file_name == file_name)
    }

    /// Documents in generation order.
    pub fn docs(&self) -> &[GeneratedDoc] {
        &self.docs
    }

    pub fn written_count(&self) -> usize {
        self.docs.iter().filter(|d| d.written).count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.docs.len() - self.written_count()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Site index lines, `- xref:<prefix><file>[<title>]`, sorted by title.
    pub fn render_index(&self, prefix: &str) -> Result<String, DocsError> {
        Ok(index::render_index(prefix, &self.docs)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("target '{}' does not exist or is not a directory", path.display())]
    InvalidTarget { path: PathBuf },
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("failed to render index: {0}")]
    Index(#[from] askama::Error),
}

/// Renders documents for the selected modules of a prepared registry.
#[derive(Debug)]
pub struct DocGenerator<R> {
    renderer: R,
    settings: DocSettings,
}

impl<R: DocumentRenderer> DocGenerator<R> {
    pub fn new(renderer: R, settings: DocSettings) -> Self {
        Self { renderer, settings }
    }

    /// Render and write every selected type. The registry must have been prepared.
    pub fn generate(&self, registry: &TypeRegistry) -> Result<GenerationSummary, DocsError> {
        let output_dir = &self.settings.output_dir;
        if !output_dir.is_dir() {
            return Err(DocsError::InvalidTarget {
                path: output_dir.clone(),
            });
        }

        let selected: Vec<&RegisteredModule> = registry
            .modules()
            .iter()
            .filter(|module| self.settings.module_filter.matches(&module.name))
            .collect();

        let documents = self.plan(registry, &selected);
        let classifier = TypeClassifier::new(
            registry,
            &self.settings.namespace,
            &documents,
            &self.settings.relative_path,
        );

        let mut summary = GenerationSummary::default();
        for module in selected {
            info!(module = %module.name, types = module.type_ids.len(), "Documenting module");
            for &id in &module.type_ids {
                self.document_type(registry.get(id), &classifier, &mut summary)?;
            }
        }
        Ok(summary)
    }

    /// Every file this run will produce, so classification can link to them up front.
    fn plan(&self, registry: &TypeRegistry, selected: &[&RegisteredModule]) -> OutputDocuments {
        let mut documents = OutputDocuments::new(Some(self.settings.output_dir.clone()));
        for module in selected {
            for &id in &module.type_ids {
                let ty = registry.get(id);
                documents.plan(doc_file_name(&ty.type_name));
                if ty.needs_annotated_copy() {
                    documents.plan(doc_file_name(ty.annotated_type()));
                }
            }
        }
        debug!(planned = documents.planned_count(), "Planned documents");
        documents
    }

    fn document_type(
        &self,
        resolved: &ConfiguredType,
        classifier: &TypeClassifier<'_, OutputDocuments>,
        summary: &mut GenerationSummary,
    ) -> Result<(), DocsError> {
        let mut ty = resolved.clone();
        ty.options.sort_by(|a, b| a.key.cmp(&b.key));
        classifier.classify_all(&mut ty.options);

        // Types sharing a canonical type share its document; the first one owns it
        let file_name = doc_file_name(&ty.type_name);
        if summary.contains(&file_name) {
            debug!(
                file = %file_name,
                annotated_type = ty.annotated_type(),
                "Canonical document already generated in this run, emitting annotated copy only"
            );
        } else {
            let written = self.emit(&file_name, &ty)?;
            summary.record(file_name, ty.title.clone(), written);
        }

        if ty.needs_annotated_copy() {
            let annotated = ty.annotated_type();
            let file_name = doc_file_name(annotated);
            let written = self.emit(&file_name, &ty)?;
            summary.record(file_name, self.settings.namespace.title(annotated), written);
        }
        Ok(())
    }

    /// Render `ty` into `file_name`, keeping that file's copyright year. Returns whether it wrote.
    fn emit(&self, file_name: &str, ty: &ConfiguredType) -> Result<bool, DocsError> {
        let path = self.settings.output_dir.join(file_name);
        let year = year_range_for(&path, self.settings.current_year).map_err(|e| {
            DocsError::Read {
                path: path.clone(),
                source: e,
            }
        })?;
        let content = self.renderer.render(&RenderContext::new(ty, year))?;
        write_if_changed(&path, &content)
    }
}

/// Write `content` unless the file already holds exactly these bytes. Returns whether it wrote.
fn write_if_changed(path: &Path, content: &str) -> Result<bool, DocsError> {
    match std::fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            debug!(path = %path.display(), "Unchanged, skipping write");
            return Ok(false);
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(DocsError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }
    std::fs::write(path, content).map_err(|e| DocsError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "Wrote document");
    Ok(true)
}
