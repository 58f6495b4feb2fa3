//! Inheritance flattening.

use std::collections::{BTreeMap, HashMap};

use super::{FindingCode, ResolutionFinding, ResolutionReport};
use crate::metadata::ConfigOption;
use crate::registry::{TypeId, TypeRegistry};

/// Copy every parent's effective options into each inheriting type and clear its parents.
///
/// Parents are applied in declaration order, so a later parent overrides an earlier one
/// for the same key, and the type's own options override all parents. Types without
/// parents are left untouched. Types whose parents never resolve keep their own options
/// and their parent list, and are reported.
pub fn resolve_inheritance(registry: &mut TypeRegistry, report: &mut ResolutionReport) {
    let mut remaining = registry.indexed_ids();
    let mut resolved: HashMap<String, TypeId> = HashMap::new();

    loop {
        let ready = remaining.iter().position(|&id| {
            registry
                .get(id)
                .inherits
                .iter()
                .all(|parent| resolved.contains_key(parent))
        });
        let Some(position) = ready else {
            break;
        };

        let id = remaining.remove(position);
        if registry.get(id).has_parents() {
            flatten(registry, id, &resolved);
        }
        mark_resolved(registry, id, &mut resolved);
    }

    for id in remaining {
        let ty = registry.get(id);
        let unmet: Vec<String> = ty
            .inherits
            .iter()
            .filter(|parent| !resolved.contains_key(*parent))
            .cloned()
            .collect();
        report.push(ResolutionFinding {
            code: FindingCode::UnresolvedInheritance,
            type_name: ty.type_name.clone(),
            option: None,
            message: format!(
                "Type '{}' inherits {:?}, which could not be resolved",
                ty.type_name, unmet
            ),
            unmet,
        });
    }
}

fn flatten(registry: &mut TypeRegistry, id: TypeId, resolved: &HashMap<String, TypeId>) {
    let mut effective: BTreeMap<String, ConfigOption> = BTreeMap::new();

    for parent in &registry.get(id).inherits {
        let parent_id = resolved[parent];
        for option in &registry.get(parent_id).options {
            effective.insert(option.key.clone(), option.clone());
        }
    }

    let ty = registry.get_mut(id);
    for option in ty.options.drain(..) {
        effective.insert(option.key.clone(), option);
    }
    ty.options = effective.into_values().collect();
    ty.inherits.clear();
}

/// Parents may be named by either identity, so both resolve to the same entry.
fn mark_resolved(registry: &TypeRegistry, id: TypeId, resolved: &mut HashMap<String, TypeId>) {
    let ty = registry.get(id);
    resolved.insert(ty.type_name.clone(), id);
    resolved.insert(ty.annotated_type().to_string(), id);
}
