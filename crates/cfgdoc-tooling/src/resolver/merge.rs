//! Merge flattening.

use std::collections::{HashMap, HashSet};

use super::{FindingCode, ResolutionFinding, ResolutionReport};
use crate::metadata::ConfigOption;
use crate::registry::{TypeId, TypeRegistry};

/// Replace every `merge` option with the options of the type it names.
///
/// A type is resolved once none of its options are outstanding merges; only resolved types
/// are spliced, so nested merges flatten bottom-up. Spliced options are appended after the
/// owner's options and never replace an option the owner already has. Merge options whose
/// target never resolves stay in place and are reported individually.
pub fn resolve_merges(registry: &mut TypeRegistry, report: &mut ResolutionReport) {
    let mut remaining = registry.indexed_ids();
    let mut resolved: HashMap<String, TypeId> = HashMap::new();
    let mut progressed = true;

    while progressed {
        progressed = false;
        let mut pending = Vec::with_capacity(remaining.len());

        for id in std::mem::take(&mut remaining) {
            if splice_resolved_targets(registry, id, &resolved) {
                progressed = true;
            }
            if registry.get(id).has_pending_merges() {
                pending.push(id);
            } else {
                let ty = registry.get(id);
                resolved.insert(ty.type_name.clone(), id);
                resolved.insert(ty.annotated_type().to_string(), id);
                progressed = true;
            }
        }

        remaining = pending;
    }

    for id in remaining {
        let ty = registry.get(id);
        for option in ty.options.iter().filter(|o| o.merge) {
            report.push(ResolutionFinding {
                code: FindingCode::UnresolvedMerge,
                type_name: ty.type_name.clone(),
                option: Some(option.key.clone()),
                unmet: vec![option.value_type.clone()],
                message: format!(
                    "Option '{}' of type '{}' merges '{}', which could not be resolved",
                    option.key, ty.type_name, option.value_type
                ),
            });
        }
    }
}

/// Splice every merge option whose target is resolved. Returns whether anything changed.
fn splice_resolved_targets(
    registry: &mut TypeRegistry,
    id: TypeId,
    resolved: &HashMap<String, TypeId>,
) -> bool {
    let targets: Vec<TypeId> = registry
        .get(id)
        .options
        .iter()
        .filter(|option| option.merge)
        .filter_map(|option| resolved.get(&option.value_type).copied())
        .collect();
    if targets.is_empty() {
        return false;
    }

    let spliced: Vec<ConfigOption> = targets
        .iter()
        .flat_map(|&target| registry.get(target).options.iter().cloned())
        .collect();

    let ty = registry.get_mut(id);
    ty.options
        .retain(|option| !(option.merge && resolved.contains_key(&option.value_type)));

    let mut keys: HashSet<String> = ty.options.iter().map(|o| o.key.clone()).collect();
    for option in spliced {
        if keys.insert(option.key.clone()) {
            ty.options.push(option);
        }
    }

    true
}
