use crate::node::{
    ComponentDefinition, DeclKind, EnumDefinition, SchemaBundle, SourceFile, TypeDefinition,
};
use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};
use thiserror::Error as ThisError;

///
/// IndexError
///

#[derive(Debug, ThisError)]
pub enum IndexError {
    #[error("duplicate qualified name '{name}' declared in '{first}' and '{second}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
}

///
/// SchemaIndex
///
/// Lookup tables over a flat declaration graph, keyed by qualified name.
/// Built once, read-only afterwards.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaIndex {
    types: BTreeMap<String, TypeDefinition>,
    enums: BTreeMap<String, EnumDefinition>,
    components: BTreeMap<String, ComponentDefinition>,
    files: BTreeMap<String, SourceFile>,
    nested_types: BTreeMap<String, Vec<String>>,
    nested_enums: BTreeMap<String, Vec<String>>,
    command_types: BTreeSet<String>,
}

impl SchemaIndex {
    /// Index every declaration in the bundle; a qualified name declared twice
    /// (by any kind) is rejected.
    pub fn new(bundle: SchemaBundle) -> Result<Self, IndexError> {
        let mut index = Self::default();

        for file in bundle.schema_files {
            let source = SourceFile {
                canonical_path: file.canonical_path,
                package: file.package.name,
            };

            for def in file.types {
                index.claim(&def.qualified_name, &source)?;
                if let Some(outer) = &def.outer_type {
                    index
                        .nested_types
                        .entry(outer.clone())
                        .or_default()
                        .push(def.qualified_name.clone());
                }
                index.types.insert(def.qualified_name.clone(), def);
            }

            for def in file.enums {
                index.claim(&def.qualified_name, &source)?;
                if let Some(outer) = &def.outer_type {
                    index
                        .nested_enums
                        .entry(outer.clone())
                        .or_default()
                        .push(def.qualified_name.clone());
                }
                index.enums.insert(def.qualified_name.clone(), def);
            }

            for def in file.components {
                index.claim(&def.qualified_name, &source)?;
                for cmd in &def.commands {
                    index.command_types.insert(cmd.request_type.clone());
                    index.command_types.insert(cmd.response_type.clone());
                }
                index.components.insert(def.qualified_name.clone(), def);
            }
        }

        // children are kept in name order so resolution output is stable
        for names in index.nested_types.values_mut() {
            names.sort();
        }
        for names in index.nested_enums.values_mut() {
            names.sort();
        }

        Ok(index)
    }

    // claim
    // records the owning file, rejecting a second declaration of the same name
    fn claim(&mut self, name: &str, source: &SourceFile) -> Result<(), IndexError> {
        match self.files.entry(name.to_string()) {
            Entry::Occupied(prev) => Err(IndexError::DuplicateName {
                name: name.to_string(),
                first: prev.get().canonical_path.clone(),
                second: source.canonical_path.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(source.clone());
                Ok(())
            }
        }
    }

    //
    // lookups
    //

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.get(name)
    }

    #[must_use]
    pub fn get_component(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.get(name)
    }

    /// The file that declared `name`.
    #[must_use]
    pub fn file_of(&self, name: &str) -> Option<&SourceFile> {
        self.files.get(name)
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<DeclKind> {
        if self.components.contains_key(name) {
            Some(DeclKind::Component)
        } else if self.types.contains_key(name) {
            Some(DeclKind::Type)
        } else if self.enums.contains_key(name) {
            Some(DeclKind::Enum)
        } else {
            None
        }
    }

    /// Outer type of a type or enum declaration; components never nest.
    #[must_use]
    pub fn outer_of(&self, name: &str) -> Option<&str> {
        self.types
            .get(name)
            .and_then(|t| t.outer_type.as_deref())
            .or_else(|| self.enums.get(name).and_then(|e| e.outer_type.as_deref()))
    }

    #[must_use]
    pub fn nested_types(&self, outer: &str) -> &[String] {
        self.nested_types.get(outer).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn nested_enums(&self, outer: &str) -> &[String] {
        self.nested_enums.get(outer).map_or(&[], Vec::as_slice)
    }

    /// True when `name` is the request or response payload of any command.
    #[must_use]
    pub fn is_command_type(&self, name: &str) -> bool {
        self.command_types.contains(name)
    }

    //
    // iteration
    //

    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeDefinition)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn enums(&self) -> impl Iterator<Item = (&str, &EnumDefinition)> {
        self.enums.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &ComponentDefinition)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

///
/// TESTS
///
