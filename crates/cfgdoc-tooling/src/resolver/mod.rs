//! Inheritance and merge flattening over the type registry.
//!
//! Both passes are fixed-point scans with explicit remaining/resolved sets: a type (or a
//! merge option) is resolved once everything it depends on is resolved, and the scan stops
//! when a pass makes no progress. Whatever is left is reported, never fatal; cycles and
//! references to types outside the loaded metadata degrade the same way.
//!
//! Inheritance runs first so that merge targets splice in their inherited options too.

mod inheritance;
mod merge;

pub use inheritance::resolve_inheritance;
pub use merge::resolve_merges;

use serde::Serialize;

use crate::registry::TypeRegistry;

/// Kind of recoverable resolution problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    /// A type has parents that are missing or part of a cycle.
    UnresolvedInheritance,
    /// An option merges a type that is missing or part of a cycle.
    UnresolvedMerge,
}

/// A single recoverable resolution problem.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionFinding {
    pub code: FindingCode,
    /// Canonical name of the offending type.
    pub type_name: String,
    /// Option key, for merge findings.
    pub option: Option<String>,
    /// Dependencies that could not be resolved.
    pub unmet: Vec<String>,
    /// Human-readable message.
    pub message: String,
}

/// All recoverable problems found while resolving one registry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionReport {
    pub findings: Vec<ResolutionFinding>,
}

impl ResolutionReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn unresolved_inheritance(&self) -> impl Iterator<Item = &ResolutionFinding> {
        self.with_code(FindingCode::UnresolvedInheritance)
    }

    pub fn unresolved_merges(&self) -> impl Iterator<Item = &ResolutionFinding> {
        self.with_code(FindingCode::UnresolvedMerge)
    }

    fn with_code(&self, code: FindingCode) -> impl Iterator<Item = &ResolutionFinding> {
        self.findings.iter().filter(move |f| f.code == code)
    }

    /// Emit every finding as a warning.
    pub fn log(&self) {
        for finding in &self.findings {
            tracing::warn!(
                code = ?finding.code,
                type_name = %finding.type_name,
                unmet = ?finding.unmet,
                "{}",
                finding.message
            );
        }
    }

    pub(crate) fn push(&mut self, finding: ResolutionFinding) {
        self.findings.push(finding);
    }
}

/// Flatten inheritance, then merges, collecting every unresolved dependency.
pub fn resolve_all(registry: &mut TypeRegistry) -> ResolutionReport {
    let mut report = ResolutionReport::default();
    resolve_inheritance(registry, &mut report);
    resolve_merges(registry, &mut report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::parse_metadata_str;
    use crate::registry::RegistryKey;

    #[test]
    fn test_merge_target_includes_inherited_options() {
        let mut registry = TypeRegistry::from_modules(
            parse_metadata_str(
                r#"[{"module": "m", "types": [
                  {"type": "a.Base", "options": [{"key": "timeout"}]},
                  {"type": "a.Tls", "inherits": ["a.Base"], "options": [{"key": "cipher"}]},
                  {"type": "a.Server", "options": [
                    {"key": "port"},
                    {"key": "tls", "type": "a.Tls", "merge": true}
                  ]}
                ]}]"#,
            )
            .unwrap(),
            RegistryKey::Type,
        );

        let report = resolve_all(&mut registry);
        assert!(report.is_clean());

        let keys: Vec<_> = registry
            .lookup("a.Server")
            .unwrap()
            .options
            .iter()
            .map(|o| o.key.as_str())
            .collect();
        assert_eq!(keys, vec!["port", "cipher", "timeout"]);
    }

    #[test]
    fn test_report_groups_findings_by_code() {
        let mut registry = TypeRegistry::from_modules(
            parse_metadata_str(
                r#"[{"module": "m", "types": [
                  {"type": "a.Child", "inherits": ["x.Missing"]},
                  {"type": "a.Owner", "options": [{"key": "k", "type": "x.Gone", "merge": true}]}
                ]}]"#,
            )
            .unwrap(),
            RegistryKey::Type,
        );

        let report = resolve_all(&mut registry);
        assert_eq!(report.unresolved_inheritance().count(), 1);
        assert_eq!(report.unresolved_merges().count(), 1);
        assert!(!report.is_clean());
    }
}
