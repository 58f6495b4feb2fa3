//! Runtime template engine for type documents.
//!
//! Uses Tera so the page layout can be replaced without rebuilding: a built-in AsciiDoc
//! template ships with the crate, and a template file can be supplied instead. The engine
//! only sees an immutable [`RenderContext`]; all resolution and classification happen
//! before rendering.

mod engine;
mod filters;

pub use engine::{
    DocumentRenderer, EngineError, RenderContext, TemplateEngine, BUILTIN_TEMPLATE, TEMPLATE_NAME,
};
