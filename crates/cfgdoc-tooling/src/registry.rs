//! Keyed type index owning every loaded module and type for one run.
//!
//! Types live in an arena addressed by [`TypeId`]; modules keep the ids of the types they
//! declared. The lookup index maps one identity per type (chosen by [`RegistryKey`]) to its
//! id. Two types registering under the same key resolve last-write-wins: the later type
//! owns the key, the earlier one stays in its module but is no longer indexed.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::metadata::{ConfiguredType, MetadataModule};

/// Index of a type in the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// Which identity a type is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryKey {
    /// The type carrying the configuration annotation.
    #[default]
    AnnotatedType,
    /// The canonical type.
    Type,
}

impl RegistryKey {
    fn key_of(self, ty: &ConfiguredType) -> &str {
        match self {
            Self::AnnotatedType => ty.annotated_type(),
            Self::Type => &ty.type_name,
        }
    }
}

impl FromStr for RegistryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annotated-type" => Ok(Self::AnnotatedType),
            "type" => Ok(Self::Type),
            other => Err(format!(
                "unknown registry key '{other}' (expected 'annotated-type' or 'type')"
            )),
        }
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnnotatedType => write!(f, "annotated-type"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// A module and the ids of the types it declared, in declaration order.
#[derive(Debug, Clone)]
pub struct RegisteredModule {
    pub name: String,
    pub type_ids: Vec<TypeId>,
}

/// Arena of all types plus the keyed lookup index.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    key: RegistryKey,
    types: Vec<ConfiguredType>,
    modules: Vec<RegisteredModule>,
    index: HashMap<String, TypeId>,
}

impl TypeRegistry {
    pub fn new(key: RegistryKey) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    /// Build a registry from loaded modules, registering types in document order.
    pub fn from_modules(modules: Vec<MetadataModule>, key: RegistryKey) -> Self {
        let mut registry = Self::new(key);
        for module in modules {
            registry.add_module(module);
        }
        registry
    }

    pub fn add_module(&mut self, module: MetadataModule) {
        let type_ids = module
            .types
            .into_iter()
            .map(|ty| self.register(ty))
            .collect();
        self.modules.push(RegisteredModule {
            name: module.module,
            type_ids,
        });
    }

    /// Insert a type, overwriting any index entry under the same key.
    pub fn register(&mut self, ty: ConfiguredType) -> TypeId {
        let id = TypeId(self.types.len());
        let key = self.key.key_of(&ty).to_string();
        if let Some(previous) = self.index.insert(key, id) {
            tracing::debug!(
                key = self.key.key_of(&ty),
                ?previous,
                "Registry key collision, later type wins"
            );
        }
        self.types.push(ty);
        id
    }

    /// Look up the type currently indexed under `key`.
    pub fn lookup(&self, key: &str) -> Option<&ConfiguredType> {
        self.index.get(key).map(|&id| &self.types[id.0])
    }

    pub fn get(&self, id: TypeId) -> &ConfiguredType {
        &self.types[id.0]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut ConfiguredType {
        &mut self.types[id.0]
    }

    /// Ids reachable through the index, in registration order.
    ///
    /// Shadowed types (lost a key collision) are excluded; resolution passes only see these.
    pub fn indexed_ids(&self) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.index.values().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Every id in the arena, shadowed types included.
    pub fn all_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len()).map(TypeId)
    }

    /// Indexed types, in registration order.
    pub fn indexed_types(&self) -> impl Iterator<Item = &ConfiguredType> + '_ {
        self.indexed_ids().into_iter().map(move |id| self.get(id))
    }

    pub fn modules(&self) -> &[RegisteredModule] {
        &self.modules
    }

    /// Number of types in the arena, shadowed ones included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
