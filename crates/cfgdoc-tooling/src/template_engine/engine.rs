//! Tera-backed document renderer.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};

use super::filters;
use crate::metadata::ConfiguredType;

/// Name the document template is registered under.
pub const TEMPLATE_NAME: &str = "type-docs.adoc";

/// AsciiDoc template used when no template file is configured.
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/type-docs.adoc.tera");

/// Everything a document template can see. Built once per type, never mutated.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    /// Current year, or the preserved copyright range (`2022, 2026`).
    pub year: String,
    pub has_required: bool,
    pub has_optional: bool,
    /// Resolved type with sorted, classified options.
    pub config_type: &'a ConfiguredType,
}

impl<'a> RenderContext<'a> {
    pub fn new(config_type: &'a ConfiguredType, year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            has_required: config_type.options.iter().any(|o| o.required),
            has_optional: config_type.options.iter().any(|o| !o.required),
            config_type,
        }
    }
}

/// Turns a render context into document text.
pub trait DocumentRenderer {
    fn render(&self, context: &RenderContext<'_>) -> Result<String, EngineError>;
}

/// Template engine wrapping Tera with the document template and custom filters.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Engine over the built-in AsciiDoc template.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    /// Engine over a template file. A missing or invalid file is an error.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let source = std::fs::read_to_string(path).map_err(|e| EngineError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_source(&source)
    }

    pub fn from_source(source: &str) -> Result<Self, EngineError> {
        let mut tera = Tera::default();
        tera.register_filter("anchor", filters::anchor);
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| EngineError::Compile {
                template: TEMPLATE_NAME.to_string(),
                source: e,
            })?;
        Ok(Self { tera })
    }
}

impl DocumentRenderer for TemplateEngine {
    fn render(&self, context: &RenderContext<'_>) -> Result<String, EngineError> {
        let context = Context::from_serialize(context).map_err(|e| EngineError::Render {
            template: TEMPLATE_NAME.to_string(),
            source: e,
        })?;
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| EngineError::Render {
                template: TEMPLATE_NAME.to_string(),
                source: e,
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read template '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to compile template '{template}': {source}")]
    Compile {
        template: String,
        source: tera::Error,
    },
    #[error("render error for '{template}': {source}")]
    Render {
        template: String,
        source: tera::Error,
    },
}
