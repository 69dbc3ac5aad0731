use crate::{
    node::{Annotation, SourceReference},
    types::{FieldId, Primitive},
};
use derive_more::Display;
use serde::Deserialize;

///
/// FieldDefinition
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "RawFieldDefinition")]
pub struct FieldDefinition {
    pub name: String,
    pub field_id: FieldId,
    pub shape: FieldShape,
    pub transient: bool,
    pub annotations: Vec<Annotation>,
    pub source_reference: SourceReference,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, field_id: FieldId, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            field_id,
            shape,
            transient: false,
            annotations: Vec::new(),
            source_reference: SourceReference::default(),
        }
    }

    #[must_use]
    pub fn singular(name: impl Into<String>, field_id: FieldId, ty: TypeReference) -> Self {
        Self::new(name, field_id, FieldShape::Singular(ty))
    }

    #[must_use]
    pub fn option(name: impl Into<String>, field_id: FieldId, ty: TypeReference) -> Self {
        Self::new(name, field_id, FieldShape::Option(ty))
    }

    #[must_use]
    pub fn list(name: impl Into<String>, field_id: FieldId, ty: TypeReference) -> Self {
        Self::new(name, field_id, FieldShape::List(ty))
    }

    #[must_use]
    pub fn map(
        name: impl Into<String>,
        field_id: FieldId,
        key: TypeReference,
        value: TypeReference,
    ) -> Self {
        Self::new(name, field_id, FieldShape::Map { key, value })
    }

    /// Every type reference this field carries (one, or two for maps).
    pub fn references(&self) -> impl Iterator<Item = &TypeReference> {
        self.shape.references()
    }
}

///
/// FieldShape
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum FieldShape {
    #[display("singular<{_0}>")]
    Singular(TypeReference),

    #[display("option<{_0}>")]
    Option(TypeReference),

    #[display("list<{_0}>")]
    List(TypeReference),

    #[display("map<{key}, {value}>")]
    Map {
        key: TypeReference,
        value: TypeReference,
    },
}

impl FieldShape {
    pub fn references(&self) -> impl Iterator<Item = &TypeReference> {
        let (first, second) = match self {
            Self::Singular(ty) | Self::Option(ty) | Self::List(ty) => (ty, None),
            Self::Map { key, value } => (key, Some(value)),
        };

        std::iter::once(first).chain(second)
    }
}

///
/// TypeReference
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq)]
#[serde(try_from = "RawTypeReference")]
pub enum TypeReference {
    #[display("{_0}")]
    Primitive(Primitive),

    #[display("enum {_0}")]
    Enum(String),

    #[display("{_0}")]
    Named(String),
}

impl TypeReference {
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn named_type(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Primitive(_) | Self::Enum(_) => None,
        }
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        matches!(self, Self::Primitive(p) if p.is_entity())
    }
}

impl From<Primitive> for TypeReference {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

//
// Wire form
//
// The schema compiler emits one nullable member per variant; exactly one
// must be populated.
//

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawTypeReference {
    #[serde(default)]
    primitive: Option<Primitive>,

    #[serde(default, rename = "enum")]
    enumeration: Option<String>,

    #[serde(default, rename = "type")]
    named: Option<String>,
}

impl TryFrom<RawTypeReference> for TypeReference {
    type Error = String;

    fn try_from(raw: RawTypeReference) -> Result<Self, Self::Error> {
        match (raw.primitive, raw.enumeration, raw.named) {
            (Some(p), None, None) => Ok(Self::Primitive(p)),
            (None, Some(e), None) => Ok(Self::Enum(e)),
            (None, None, Some(t)) => Ok(Self::Named(t)),
            (None, None, None) => Err("type reference has no variant set".to_string()),
            _ => Err("type reference has more than one variant set".to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSingular {
    #[serde(rename = "type")]
    ty: TypeReference,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawInner {
    inner_type: TypeReference,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawMap {
    key_type: TypeReference,
    value_type: TypeReference,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawFieldDefinition {
    name: String,
    field_id: FieldId,

    #[serde(default)]
    singular_type: Option<RawSingular>,

    #[serde(default)]
    option_type: Option<RawInner>,

    #[serde(default)]
    list_type: Option<RawInner>,

    #[serde(default)]
    map_type: Option<RawMap>,

    #[serde(default)]
    transient: bool,

    #[serde(default)]
    annotations: Vec<Annotation>,

    #[serde(default)]
    source_reference: SourceReference,
}

impl TryFrom<RawFieldDefinition> for FieldDefinition {
    type Error = String;

    fn try_from(raw: RawFieldDefinition) -> Result<Self, Self::Error> {
        let shape = match (raw.singular_type, raw.option_type, raw.list_type, raw.map_type) {
            (Some(s), None, None, None) => FieldShape::Singular(s.ty),
            (None, Some(o), None, None) => FieldShape::Option(o.inner_type),
            (None, None, Some(l), None) => FieldShape::List(l.inner_type),
            (None, None, None, Some(m)) => FieldShape::Map {
                key: m.key_type,
                value: m.value_type,
            },
            (None, None, None, None) => {
                return Err(format!("field '{}' has no shape set", raw.name));
            }
            _ => return Err(format!("field '{}' has more than one shape set", raw.name)),
        };

        Ok(Self {
            name: raw.name,
            field_id: raw.field_id,
            shape,
            transient: raw.transient,
            annotations: raw.annotations,
            source_reference: raw.source_reference,
        })
    }
}

///
/// TESTS
///
