//! Type naming: primitive aliases, display labels, titles, file names and javadoc links.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::metadata::OptionKind;

/// Extension of generated type documents.
pub const DOC_EXTENSION: &str = "adoc";

/// Well-known value types and the short names they render as.
static TYPE_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("java.lang.String", "string"),
        ("java.lang.Integer", "int"),
        ("java.lang.Boolean", "boolean"),
        ("java.lang.Long", "long"),
        ("java.lang.Character", "char"),
        ("java.lang.Float", "float"),
        ("java.lang.Double", "double"),
    ])
});

/// Short alias of a well-known value type.
pub fn primitive_alias(type_name: &str) -> Option<&'static str> {
    TYPE_ALIASES.get(type_name).copied()
}

/// Wrap a label according to the option kind.
pub fn by_kind(kind: OptionKind, label: &str) -> String {
    match kind {
        OptionKind::Value => label.to_string(),
        OptionKind::List => format!("{label}[]"),
        OptionKind::Map => format!("map<string, {label}>"),
    }
}

/// Simple name of a type; a nested `Builder` keeps its enclosing name (`Outer.Builder`),
/// and a top-level `Builder` keeps its full name.
pub fn display_label(type_name: &str) -> String {
    let Some((base, simple)) = type_name.rsplit_once('.') else {
        return type_name.to_string();
    };
    if simple != "Builder" {
        return simple.to_string();
    }
    match base.rsplit_once('.') {
        Some((_, enclosing)) => format!("{enclosing}.Builder"),
        None => type_name.to_string(),
    }
}

/// Document file name for a type: namespace separators become `_`.
pub fn doc_file_name(type_name: &str) -> String {
    format!("{}.{DOC_EXTENSION}", type_name.replace('.', "_"))
}

/// The namespace whose types are documented by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNamespace {
    root: String,
}

impl RootNamespace {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Whether the type lives in (or below) the root namespace.
    pub fn contains(&self, type_name: &str) -> bool {
        type_name
            .strip_prefix(&self.root)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    }

    /// The opaque key/value configuration node type.
    pub fn config_type(&self) -> String {
        format!("{}.config.Config", self.root)
    }

    /// `SimpleName (namespace)` relative to the root; foreign types keep their full name.
    pub fn title(&self, type_name: &str) -> String {
        let Some(relative) = type_name
            .strip_prefix(&self.root)
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            return type_name.to_string();
        };
        match relative.rsplit_once('.') {
            Some((namespace, simple)) => format!("{simple} ({namespace})"),
            None => relative.to_string(),
        }
    }

    /// Javadoc link for root-namespace types, the plain name otherwise.
    ///
    /// The javadoc module is the enclosing package, minus a trailing `spi` segment.
    pub fn type_reference(&self, type_name: &str) -> String {
        if !self.contains(type_name) {
            return type_name.to_string();
        }
        let Some((package, simple)) = type_name.rsplit_once('.') else {
            return type_name.to_string();
        };
        if simple.is_empty() || !simple.chars().all(|c| c.is_ascii_alphanumeric()) {
            return type_name.to_string();
        }
        let module = package.strip_suffix(".spi").unwrap_or(package);
        format!(
            "link:{{javadoc-base-url}}/{module}/{}.html[{type_name}]",
            type_name.replace('.', "/")
        )
    }
}

impl Default for RootNamespace {
    fn default() -> Self {
        Self::new("io.helidon")
    }
}
