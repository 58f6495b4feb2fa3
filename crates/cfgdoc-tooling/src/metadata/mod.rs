//! Configuration metadata model.
//!
//! These types mirror the `config-metadata.json` documents emitted at build time for every
//! module that declares configurable types. They deserialize from the camelCase document
//! format and serialize with snake_case field names for the template context.

mod loader;

pub use loader::{
    discover_metadata_files, load_modules, parse_document, parse_metadata_str, LoadError,
    METADATA_FILE_NAME,
};

use serde::{Deserialize, Serialize};

const DEFAULT_OPTION_TYPE: &str = "java.lang.String";

fn default_option_type() -> String {
    DEFAULT_OPTION_TYPE.to_string()
}

/// Shape of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionKind {
    /// Single value.
    #[default]
    Value,
    /// List of values.
    List,
    /// String-keyed map of values.
    Map,
}

/// One literal value an option may take.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AllowedValue {
    pub value: String,
    #[serde(default)]
    pub description: String,
}

/// One configuration property of a [`ConfiguredType`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ConfigOption {
    /// Configuration key, unique within the owning type after resolution.
    pub key: String,

    /// Value type identity (fully qualified).
    #[serde(rename(deserialize = "type"), default = "default_option_type")]
    pub value_type: String,

    #[serde(default)]
    pub kind: OptionKind,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub default_value: Option<String>,

    /// Free-text description; Javadoc HTML until translated.
    #[serde(default)]
    pub description: String,

    /// Inline the options of `value_type` into the owner instead of referencing it.
    #[serde(default)]
    pub merge: bool,

    /// `value_type` is a service provider interface.
    #[serde(default)]
    pub provider: bool,

    /// Interface implementations are matched against, when it differs from `value_type`.
    #[serde(default)]
    pub provider_type: Option<String>,

    /// Builder method that sets this option.
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub allowed_values: Option<Vec<AllowedValue>>,

    /// Display text computed at render time.
    #[serde(skip_deserializing)]
    pub ref_type: Option<String>,
}

impl ConfigOption {
    /// Allowed values, if the option declares a non-empty set.
    pub fn allowed_values(&self) -> Option<&[AllowedValue]> {
        self.allowed_values
            .as_deref()
            .filter(|values| !values.is_empty())
    }

    /// Interface that provider implementations are matched against.
    pub fn provider_interface(&self) -> &str {
        self.provider_type.as_deref().unwrap_or(&self.value_type)
    }
}

/// A configurable entity and its options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ConfiguredType {
    /// Canonical type identity.
    #[serde(rename(deserialize = "type"))]
    pub type_name: String,

    /// Type carrying the configuration annotation, when distinct from `type_name`
    /// (e.g. a builder of the canonical type).
    #[serde(default)]
    pub annotated_type: Option<String>,

    /// Configuration key prefix.
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub standalone: bool,

    /// Service interfaces this type implements.
    #[serde(default)]
    pub provides: Vec<String>,

    #[serde(default)]
    pub producers: Vec<String>,

    /// Parent types, nearest last. Empty once inheritance is resolved.
    #[serde(default)]
    pub inherits: Vec<String>,

    #[serde(default)]
    pub options: Vec<ConfigOption>,

    /// Human title, assigned after resolution.
    #[serde(skip_deserializing)]
    pub title: String,

    /// Javadoc reference text, assigned after resolution.
    #[serde(skip_deserializing)]
    pub type_reference: String,
}

impl ConfiguredType {
    /// The annotated type identity, falling back to the canonical one.
    pub fn annotated_type(&self) -> &str {
        self.annotated_type.as_deref().unwrap_or(&self.type_name)
    }

    pub fn has_parents(&self) -> bool {
        !self.inherits.is_empty()
    }

    /// Whether any option is still an outstanding merge request.
    pub fn has_pending_merges(&self) -> bool {
        self.options.iter().any(|option| option.merge)
    }

    /// Whether documentation must also be emitted under the annotated type's name.
    ///
    /// True when the annotated type neither equals nor extends the canonical identity,
    /// e.g. two tracer builders that both produce the same tracer interface.
    pub fn needs_annotated_copy(&self) -> bool {
        !self.annotated_type().starts_with(&self.type_name)
    }
}

/// One metadata document entry: a module and the types it declares.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetadataModule {
    pub module: String,
    #[serde(default)]
    pub types: Vec<ConfiguredType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_defaults() {
        let option: ConfigOption = serde_json::from_str(r#"{"key": "name"}"#).unwrap();
        assert_eq!(option.value_type, "java.lang.String");
        assert_eq!(option.kind, OptionKind::Value);
        assert!(!option.required);
        assert!(!option.merge);
        assert!(option.allowed_values().is_none());
        assert!(option.ref_type.is_none());
    }

    #[test]
    fn test_empty_allowed_values_are_absent() {
        let option: ConfigOption =
            serde_json::from_str(r#"{"key": "mode", "allowedValues": []}"#).unwrap();
        assert!(option.allowed_values().is_none());
    }

    #[test]
    fn test_provider_interface_prefers_override() {
        let option: ConfigOption = serde_json::from_str(
            r#"{"key": "tracer", "type": "a.Tracer", "provider": true, "providerType": "a.spi.TracerProvider"}"#,
        )
        .unwrap();
        assert_eq!(option.provider_interface(), "a.spi.TracerProvider");
    }

    #[test]
    fn test_annotated_type_falls_back_to_type() {
        let ty: ConfiguredType =
            serde_json::from_str(r#"{"type": "a.b.Cache", "options": []}"#).unwrap();
        assert_eq!(ty.annotated_type(), "a.b.Cache");
        assert!(!ty.needs_annotated_copy());
    }

    #[test]
    fn test_builder_annotation_does_not_need_copy() {
        let ty: ConfiguredType = serde_json::from_str(
            r#"{"type": "a.b.Cache", "annotatedType": "a.b.Cache.Builder"}"#,
        )
        .unwrap();
        assert!(!ty.needs_annotated_copy());
    }

    #[test]
    fn test_foreign_annotation_needs_copy() {
        let ty: ConfiguredType = serde_json::from_str(
            r#"{"type": "tracing.Tracer", "annotatedType": "vendor.Zipkin"}"#,
        )
        .unwrap();
        assert!(ty.needs_annotated_copy());
    }

    #[test]
    fn test_serializes_snake_case_for_templates() {
        let option: ConfigOption =
            serde_json::from_str(r#"{"key": "size", "defaultValue": "10"}"#).unwrap();
        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(value["default_value"], "10");
        assert_eq!(value["value_type"], "java.lang.String");
    }
}
