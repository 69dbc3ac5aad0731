//! Per-declaration resolution: flattens component fields, filters
//! unsupported and recursive fields, and attaches resolved nested members.

mod recursion;
mod warning;

pub use warning::ResolveWarning;

use crate::config::{GenerateConfig, RecursionPolicy};
use compgen_schema::{
    index::SchemaIndex,
    node::{
        Annotation, CommandDefinition, EnumValueDefinition, EventDefinition, FieldDefinition,
        FieldShape, SourceFile, SourceReference, TypeReference, has_annotation,
    },
    types::{FieldId, ScalarKind},
};
use derive_more::Display;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// ResolveError
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("unknown declaration '{0}'")]
    UnknownDeclaration(String),

    #[error("'{referrer}' references unknown type '{name}'")]
    UnknownType { referrer: String, name: String },

    #[error("'{referrer}' references unknown enum '{name}'")]
    UnknownEnum { referrer: String, name: String },

    #[error("fields '{first}' and '{second}' of '{type_name}' share field id {field_id}")]
    DuplicateFieldId {
        type_name: String,
        field_id: FieldId,
        first: String,
        second: String,
    },

    #[error("declaration nesting cycle through '{0}'")]
    NestingCycle(String),

    #[error("enum '{0}' declares no values")]
    EmptyEnum(String),

    #[error("enum '{enum_name}' declares value {value} more than once")]
    DuplicateEnumValue { enum_name: String, value: u32 },
}

///
/// ValueKind
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum ValueKind {
    #[display("{_0}")]
    Scalar(ScalarKind),

    #[display("enum {_0}")]
    Enum(String),

    #[display("{_0}")]
    Named(String),
}

impl ValueKind {
    // from_reference
    // None for the unsupported Entity primitive
    fn from_reference(reference: &TypeReference) -> Option<Self> {
        match reference {
            TypeReference::Primitive(p) => p.scalar().map(Self::Scalar),
            TypeReference::Enum(name) => Some(Self::Enum(name.clone())),
            TypeReference::Named(name) => Some(Self::Named(name.clone())),
        }
    }

    #[must_use]
    pub fn named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Scalar(_) | Self::Enum(_) => None,
        }
    }
}

///
/// ResolvedShape
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum ResolvedShape {
    #[display("singular<{_0}>")]
    Singular(ValueKind),

    #[display("option<{_0}>")]
    Option(ValueKind),

    #[display("list<{_0}>")]
    List(ValueKind),

    #[display("map<{key}, {value}>")]
    Map { key: ValueKind, value: ValueKind },
}

impl ResolvedShape {
    fn from_shape(shape: &FieldShape) -> Option<Self> {
        Some(match shape {
            FieldShape::Singular(ty) => Self::Singular(ValueKind::from_reference(ty)?),
            FieldShape::Option(ty) => Self::Option(ValueKind::from_reference(ty)?),
            FieldShape::List(ty) => Self::List(ValueKind::from_reference(ty)?),
            FieldShape::Map { key, value } => Self::Map {
                key: ValueKind::from_reference(key)?,
                value: ValueKind::from_reference(value)?,
            },
        })
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ValueKind> {
        let (first, second) = match self {
            Self::Singular(kind) | Self::Option(kind) | Self::List(kind) => (kind, None),
            Self::Map { key, value } => (key, Some(value)),
        };

        std::iter::once(first).chain(second)
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map { .. })
    }
}

///
/// ResolvedField
///

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedField {
    pub name: String,
    pub field_id: FieldId,
    pub shape: ResolvedShape,

    /// Retained despite reaching its declaring type (collection shapes only).
    pub recursive: bool,

    pub transient: bool,
    pub annotations: Vec<Annotation>,
}

impl ResolvedField {
    #[must_use]
    pub fn has_annotation(&self, type_name: &str) -> bool {
        has_annotation(&self.annotations, type_name)
    }
}

///
/// ResolvedEnum
///

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEnum {
    pub qualified_name: String,
    pub name: String,
    pub outer: Option<String>,
    pub source: SourceFile,
    pub position: SourceReference,
    pub values: Vec<EnumValueDefinition>,
    pub annotations: Vec<Annotation>,
}

impl ResolvedEnum {
    /// Value 0 when declared, else the first declared value.
    #[must_use]
    pub fn default_value(&self) -> Option<&EnumValueDefinition> {
        self.values
            .iter()
            .find(|v| v.value == 0)
            .or_else(|| self.values.first())
    }
}

///
/// ResolvedType
///
/// The flattened, filtered view of a type or component. Built once per
/// qualified name and never mutated afterwards.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedType {
    pub qualified_name: String,
    pub name: String,
    pub outer: Option<String>,
    pub component_id: Option<u32>,
    pub restricted: bool,
    pub command_payload: bool,
    pub source: SourceFile,
    pub position: SourceReference,
    pub fields: Vec<ResolvedField>,

    /// Names of recursive fields dropped from `fields`.
    pub omitted: Vec<String>,

    pub nested_types: Vec<Arc<Self>>,
    pub nested_enums: Vec<ResolvedEnum>,
    pub annotations: Vec<Annotation>,
    pub events: Vec<EventDefinition>,
    pub commands: Vec<CommandDefinition>,
    pub warnings: Vec<ResolveWarning>,
}

impl ResolvedType {
    #[must_use]
    pub const fn is_component(&self) -> bool {
        self.component_id.is_some()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn has_annotation(&self, type_name: &str) -> bool {
        has_annotation(&self.annotations, type_name)
    }
}

///
/// Declared
/// borrowed view of the declaration a resolved type is built from
///

struct Declared<'d> {
    name: &'d str,
    outer: Option<&'d str>,
    component_id: Option<u32>,
    fields: &'d [FieldDefinition],
    target: &'d str,
    annotations: &'d [Annotation],
    position: SourceReference,
    events: &'d [EventDefinition],
    commands: &'d [CommandDefinition],
}

///
/// Resolver
///
/// Resolves declarations against a `SchemaIndex`, memoizing by qualified
/// name. Nested declarations are resolved children-first through an
/// explicit work stack.
///

pub struct Resolver<'a> {
    index: &'a SchemaIndex,
    config: &'a GenerateConfig,
    memo: BTreeMap<String, Arc<ResolvedType>>,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(index: &'a SchemaIndex, config: &'a GenerateConfig) -> Self {
        Self {
            index,
            config,
            memo: BTreeMap::new(),
        }
    }

    /// Resolve a type or component by qualified name.
    pub fn resolve(&mut self, name: &str) -> Result<Arc<ResolvedType>, ResolveError> {
        if let Some(done) = self.memo.get(name) {
            return Ok(Arc::clone(done));
        }

        // (name, children already queued)
        let mut stack = vec![(name.to_string(), false)];
        let mut in_progress = BTreeSet::new();

        while let Some((current, expanded)) = stack.pop() {
            if self.memo.contains_key(&current) {
                continue;
            }

            if expanded {
                let resolved = self.build(&current)?;
                in_progress.remove(&current);
                self.memo.insert(current, Arc::new(resolved));
                continue;
            }

            if !in_progress.insert(current.clone()) {
                return Err(ResolveError::NestingCycle(current));
            }

            let children = self.index.nested_types(&current);
            stack.push((current.clone(), true));
            for child in children {
                if in_progress.contains(child) {
                    return Err(ResolveError::NestingCycle(child.clone()));
                }
                if !self.memo.contains_key(child) {
                    stack.push((child.clone(), false));
                }
            }
        }

        self.memo
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownDeclaration(name.to_string()))
    }

    /// Resolve every type and component in the index, in name order.
    pub fn resolve_all(&mut self) -> Result<Vec<Arc<ResolvedType>>, ResolveError> {
        let index = self.index;
        let names: Vec<&str> = index
            .types()
            .map(|(name, _)| name)
            .chain(index.components().map(|(name, _)| name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        names.into_iter().map(|name| self.resolve(name)).collect()
    }

    /// Resolve a single enum.
    pub fn resolve_enum(&self, name: &str) -> Result<ResolvedEnum, ResolveError> {
        let def = self
            .index
            .get_enum(name)
            .ok_or_else(|| ResolveError::UnknownDeclaration(name.to_string()))?;

        if def.values.is_empty() {
            return Err(ResolveError::EmptyEnum(name.to_string()));
        }

        let mut seen = BTreeSet::new();
        for value in &def.values {
            if !seen.insert(value.value) {
                return Err(ResolveError::DuplicateEnumValue {
                    enum_name: name.to_string(),
                    value: value.value,
                });
            }
        }

        Ok(ResolvedEnum {
            qualified_name: def.qualified_name.clone(),
            name: def.name.clone(),
            outer: def.outer_type.clone(),
            source: self.source_of(name)?,
            position: def.source_reference,
            values: def.values.clone(),
            annotations: def.annotations.clone(),
        })
    }

    pub fn resolve_enums(&self) -> Result<Vec<ResolvedEnum>, ResolveError> {
        self.index
            .enums()
            .map(|(name, _)| self.resolve_enum(name))
            .collect()
    }

    /// Warnings of every resolved type, in qualified-name order. A component
    /// shares its data definition's warnings; each is reported once.
    #[must_use]
    pub fn warnings(&self) -> Vec<ResolveWarning> {
        let mut seen = BTreeSet::new();

        self.memo
            .values()
            .flat_map(|ty| ty.warnings.iter())
            .filter(|w| seen.insert((w.type_name().to_string(), w.field().to_string())))
            .cloned()
            .collect()
    }

    // declared
    // the declaration behind `name`, with data-definition indirection applied
    fn declared<'d>(&'d self, name: &'d str) -> Result<Declared<'d>, ResolveError> {
        let index = self.index;

        if let Some(c) = index.get_component(name) {
            let (fields, target) = match &c.data_definition {
                Some(data) => {
                    let def = index.get_type(data).ok_or_else(|| ResolveError::UnknownType {
                        referrer: name.to_string(),
                        name: data.clone(),
                    })?;
                    (def.fields.as_slice(), data.as_str())
                }
                None => (c.fields.as_slice(), name),
            };

            Ok(Declared {
                name: &c.name,
                outer: None,
                component_id: Some(c.component_id),
                fields,
                target,
                annotations: &c.annotations,
                position: c.source_reference,
                events: &c.events,
                commands: &c.commands,
            })
        } else if let Some(t) = index.get_type(name) {
            Ok(Declared {
                name: &t.name,
                outer: t.outer_type.as_deref(),
                component_id: None,
                fields: &t.fields,
                target: name,
                annotations: &t.annotations,
                position: t.source_reference,
                events: &[],
                commands: &[],
            })
        } else {
            Err(ResolveError::UnknownDeclaration(name.to_string()))
        }
    }

    // build
    // every nested type of `name` is already memoized
    fn build(&self, name: &str) -> Result<ResolvedType, ResolveError> {
        let decl = self.declared(name)?;

        for event in decl.events {
            self.check_type(name, &event.payload_type)?;
        }
        for command in decl.commands {
            self.check_type(name, &command.request_type)?;
            self.check_type(name, &command.response_type)?;
        }

        let (fields, omitted, warnings) = self.filter_fields(decl.target, decl.fields)?;

        let nested_types = self
            .index
            .nested_types(name)
            .iter()
            .map(|child| {
                self.memo
                    .get(child)
                    .cloned()
                    .ok_or_else(|| ResolveError::UnknownDeclaration(child.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nested_enums = self
            .index
            .nested_enums(name)
            .iter()
            .map(|child| self.resolve_enum(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedType {
            qualified_name: name.to_string(),
            name: decl.name.to_string(),
            outer: decl.outer.map(str::to_string),
            component_id: decl.component_id,
            restricted: self.config.is_restricted(name),
            command_payload: self.index.is_command_type(name),
            source: self.source_of(name)?,
            position: decl.position,
            fields,
            omitted,
            nested_types,
            nested_enums,
            annotations: decl.annotations.to_vec(),
            events: decl.events.to_vec(),
            commands: decl.commands.to_vec(),
            warnings,
        })
    }

    // filter_fields
    // `target` is the type whose field graph recursion is measured against
    #[allow(clippy::type_complexity)]
    fn filter_fields(
        &self,
        target: &str,
        fields: &[FieldDefinition],
    ) -> Result<(Vec<ResolvedField>, Vec<String>, Vec<ResolveWarning>), ResolveError> {
        let mut seen: BTreeMap<FieldId, &str> = BTreeMap::new();
        let mut kept = Vec::new();
        let mut omitted = Vec::new();
        let mut warnings = Vec::new();

        for field in fields {
            if let Some(first) = seen.insert(field.field_id, &field.name) {
                return Err(ResolveError::DuplicateFieldId {
                    type_name: target.to_string(),
                    field_id: field.field_id,
                    first: first.to_string(),
                    second: field.name.clone(),
                });
            }

            for reference in field.references() {
                match reference {
                    TypeReference::Enum(name) => self.check_enum(target, name)?,
                    TypeReference::Named(name) => self.check_type(target, name)?,
                    TypeReference::Primitive(_) => {}
                }
            }

            let Some(shape) = ResolvedShape::from_shape(&field.shape) else {
                warnings.push(ResolveWarning::EntityField {
                    type_name: target.to_string(),
                    field: field.name.clone(),
                });
                continue;
            };

            let recursive = recursion::reaches(self.index, &field.shape, target);
            let keep = !recursive
                || (shape.is_collection() && self.config.recursion == RecursionPolicy::KeepCollections);

            if !keep {
                warnings.push(ResolveWarning::RecursiveField {
                    type_name: target.to_string(),
                    field: field.name.clone(),
                });
                omitted.push(field.name.clone());
                continue;
            }

            kept.push(ResolvedField {
                name: field.name.clone(),
                field_id: field.field_id,
                shape,
                recursive,
                transient: field.transient,
                annotations: field.annotations.clone(),
            });
        }

        Ok((kept, omitted, warnings))
    }

    // check_type
    fn check_type(&self, referrer: &str, name: &str) -> Result<(), ResolveError> {
        if self.index.get_type(name).is_some() {
            Ok(())
        } else {
            Err(ResolveError::UnknownType {
                referrer: referrer.to_string(),
                name: name.to_string(),
            })
        }
    }

    // check_enum
    fn check_enum(&self, referrer: &str, name: &str) -> Result<(), ResolveError> {
        if self.index.get_enum(name).is_some() {
            Ok(())
        } else {
            Err(ResolveError::UnknownEnum {
                referrer: referrer.to_string(),
                name: name.to_string(),
            })
        }
    }

    // source_of
    fn source_of(&self, name: &str) -> Result<SourceFile, ResolveError> {
        self.index
            .file_of(name)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownDeclaration(name.to_string()))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use compgen_schema::{
        node::{ComponentDefinition, EnumDefinition, SchemaBundle, SchemaFile, TypeDefinition},
        types::Primitive,
    };

    fn index(file: SchemaFile) -> SchemaIndex {
        SchemaIndex::new(SchemaBundle {
            schema_files: vec![file],
        })
        .expect("index")
    }

    fn self_type_file() -> SchemaFile {
        SchemaFile::new("tree.schema", "tree").with_type(
            TypeDefinition::new("tree.SelfType")
                .with_field(FieldDefinition::singular("label", 1, Primitive::String.into()))
                .with_field(FieldDefinition::list(
                    "children",
                    2,
                    TypeReference::named("tree.SelfType"),
                )),
        )
    }

    #[test]
    fn list_self_reference_is_dropped_with_one_warning() {
        let idx = index(self_type_file());
        let config = GenerateConfig::default();
        let ty = Resolver::new(&idx, &config)
            .resolve("tree.SelfType")
            .expect("resolve");

        assert!(ty.field("children").is_none());
        assert_eq!(ty.fields.len(), 1);
        assert_eq!(ty.omitted, vec!["children".to_string()]);
        assert_eq!(ty.warnings.len(), 1);
        assert!(ty.warnings[0].to_string().contains("SelfType.children"));
    }

    #[test]
    fn keep_collections_retains_list_recursion() {
        let idx = index(self_type_file());
        let config = GenerateConfig {
            recursion: RecursionPolicy::KeepCollections,
            ..GenerateConfig::default()
        };
        let ty = Resolver::new(&idx, &config)
            .resolve("tree.SelfType")
            .expect("resolve");

        let children = ty.field("children").expect("children kept");
        assert!(children.recursive);
        assert!(ty.warnings.is_empty());
    }

    #[test]
    fn option_self_reference_is_dropped_under_every_policy() {
        let idx = index(SchemaFile::new("l.schema", "l").with_type(
            TypeDefinition::new("l.Link").with_field(FieldDefinition::option(
                "next",
                1,
                TypeReference::named("l.Link"),
            )),
        ));
        let config = GenerateConfig {
            recursion: RecursionPolicy::KeepCollections,
            ..GenerateConfig::default()
        };
        let ty = Resolver::new(&idx, &config).resolve("l.Link").expect("resolve");

        assert!(ty.fields.is_empty());
        assert_eq!(ty.warnings.len(), 1);
    }

    #[test]
    fn entity_fields_are_dropped_with_a_warning() {
        let idx = index(SchemaFile::new("e.schema", "e").with_type(
            TypeDefinition::new("e.Holder")
                .with_field(FieldDefinition::singular("thing", 1, Primitive::Entity.into()))
                .with_field(FieldDefinition::singular("id", 2, Primitive::EntityId.into())),
        ));
        let config = GenerateConfig::default();
        let ty = Resolver::new(&idx, &config).resolve("e.Holder").expect("resolve");

        assert_eq!(ty.fields.len(), 1);
        assert_eq!(
            ty.warnings,
            vec![ResolveWarning::EntityField {
                type_name: "e.Holder".to_string(),
                field: "thing".to_string(),
            }]
        );
        assert!(ty.warnings[0].to_string().contains("currently unsupported"));
    }

    #[test]
    fn data_definition_component_shares_the_type_fields() {
        let idx = index(
            SchemaFile::new("d.schema", "d")
                .with_type(
                    TypeDefinition::new("d.HealthData")
                        .with_field(FieldDefinition::singular("hp", 1, Primitive::Int32.into()))
                        .with_field(FieldDefinition::list(
                            "history",
                            2,
                            TypeReference::named("d.HealthData"),
                        )),
                )
                .with_component(
                    ComponentDefinition::new("d.Health", 1000).with_data_definition("d.HealthData"),
                ),
        );
        let config = GenerateConfig::default();
        let mut resolver = Resolver::new(&idx, &config);

        let component = resolver.resolve("d.Health").expect("component");
        let data = resolver.resolve("d.HealthData").expect("data");

        assert_eq!(component.fields, data.fields);
        assert_eq!(component.component_id, Some(1000));
        assert_eq!(component.warnings, data.warnings);
    }

    #[test]
    fn resolution_is_idempotent() {
        let idx = index(self_type_file());
        let config = GenerateConfig::default();

        let a = Resolver::new(&idx, &config).resolve("tree.SelfType").expect("a");
        let b = Resolver::new(&idx, &config).resolve("tree.SelfType").expect("b");

        assert_eq!(*a, *b);
    }

    #[test]
    fn memo_returns_the_same_instance() {
        let idx = index(self_type_file());
        let config = GenerateConfig::default();
        let mut resolver = Resolver::new(&idx, &config);

        let a = resolver.resolve("tree.SelfType").expect("a");
        let b = resolver.resolve("tree.SelfType").expect("b");

        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn nested_members_are_attached() {
        let idx = index(
            SchemaFile::new("n.schema", "n")
                .with_type(TypeDefinition::new("n.A"))
                .with_type(TypeDefinition::new("n.A.B").nested_in("n.A"))
                .with_type(TypeDefinition::new("n.A.B.C").nested_in("n.A.B"))
                .with_enum(EnumDefinition::new("n.A.Mode").nested_in("n.A").with_value("ON", 0)),
        );
        let config = GenerateConfig::default();
        let a = Resolver::new(&idx, &config).resolve("n.A").expect("resolve");

        assert_eq!(a.nested_types.len(), 1);
        assert_eq!(a.nested_types[0].qualified_name, "n.A.B");
        assert_eq!(a.nested_types[0].nested_types[0].qualified_name, "n.A.B.C");
        assert_eq!(a.nested_enums[0].name, "Mode");
    }

    #[test]
    fn nesting_cycles_are_fatal() {
        let idx = index(
            SchemaFile::new("c.schema", "c")
                .with_type(TypeDefinition::new("c.X").nested_in("c.Y"))
                .with_type(TypeDefinition::new("c.Y").nested_in("c.X")),
        );
        let config = GenerateConfig::default();
        let err = Resolver::new(&idx, &config).resolve("c.X").expect_err("cycle");

        assert!(matches!(err, ResolveError::NestingCycle(_)));
    }

    #[test]
    fn duplicate_field_ids_are_fatal() {
        let idx = index(SchemaFile::new("f.schema", "f").with_type(
            TypeDefinition::new("f.T")
                .with_field(FieldDefinition::singular("a", 1, Primitive::Bool.into()))
                .with_field(FieldDefinition::singular("b", 1, Primitive::Bool.into())),
        ));
        let config = GenerateConfig::default();
        let err = Resolver::new(&idx, &config).resolve("f.T").expect_err("dup");

        assert!(matches!(err, ResolveError::DuplicateFieldId { field_id: 1, .. }));
    }

    #[test]
    fn unknown_references_are_fatal() {
        let idx = index(SchemaFile::new("u.schema", "u").with_type(
            TypeDefinition::new("u.T")
                .with_field(FieldDefinition::singular("x", 1, TypeReference::named("u.Missing"))),
        ));
        let config = GenerateConfig::default();
        let err = Resolver::new(&idx, &config).resolve("u.T").expect_err("unknown");

        assert!(matches!(err, ResolveError::UnknownType { ref name, .. } if name == "u.Missing"));

        let idx = index(SchemaFile::new("u.schema", "u").with_type(
            TypeDefinition::new("u.T").with_field(FieldDefinition::singular(
                "x",
                1,
                TypeReference::enumeration("u.Nope"),
            )),
        ));
        let err = Resolver::new(&idx, &config).resolve("u.T").expect_err("unknown");

        assert!(matches!(err, ResolveError::UnknownEnum { .. }));
    }

    #[test]
    fn missing_data_definition_is_fatal() {
        let idx = index(SchemaFile::new("m.schema", "m").with_component(
            ComponentDefinition::new("m.C", 5).with_data_definition("m.Gone"),
        ));
        let config = GenerateConfig::default();
        let err = Resolver::new(&idx, &config).resolve("m.C").expect_err("missing");

        assert!(matches!(err, ResolveError::UnknownType { .. }));
    }

    #[test]
    fn empty_enums_are_fatal() {
        let idx = index(SchemaFile::new("e.schema", "e").with_enum(EnumDefinition::new("e.None")));
        let config = GenerateConfig::default();
        let err = Resolver::new(&idx, &config).resolve_enum("e.None").expect_err("empty");

        assert!(matches!(err, ResolveError::EmptyEnum(_)));
    }

    #[test]
    fn restricted_flag_follows_the_prefix() {
        let idx = index(SchemaFile::new("r.schema", "improbable.restricted").with_component(
            ComponentDefinition::new("improbable.restricted.System", 59),
        ));
        let config = GenerateConfig::default();
        let ty = Resolver::new(&idx, &config)
            .resolve("improbable.restricted.System")
            .expect("resolve");

        assert!(ty.restricted);
    }
}
