//! Configuration metadata resolution and reference documentation generation.
//!
//! This crate turns `config-metadata.json` documents (one per module, describing
//! configurable types and their options) into one AsciiDoc reference page per type.
//! It is consumed by `cfgdoc-ctl` and contains no terminal or argument-parsing logic.
//!
//! ## Architecture
//!
//! ```text
//! config-metadata.json  →  TypeRegistry  →  resolver (inherits, merge)  →  TypeClassifier  →  Tera  →  *.adoc
//! (metadata::loader)       (arena + index)   (fixed-point passes)          (display text)     (docs driver)
//! ```
//!
//! # Modules
//!
//! - [`metadata`]: Metadata model and document discovery/parsing
//! - [`registry`]: Keyed type index owning every loaded module and type
//! - [`resolver`]: Inheritance and merge flattening with aggregated findings
//! - [`description`]: Javadoc HTML → AsciiDoc description translation
//! - [`classifier`]: Option display text, titles, file names and type references
//! - [`template_engine`]: Tera-based type document rendering
//! - [`docs`]: Renderer driver: idempotent writes, dual emission, copyright and index

pub mod classifier;
pub mod description;
pub mod docs;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod template_engine;
