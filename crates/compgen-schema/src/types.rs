use derive_more::Display;
use serde::Deserialize;

/// Wire addressing key of a field, unique within its declaring type.
pub type FieldId = u32;

///
/// Primitive
///
/// Primitive kinds as declared in the schema, including the reserved
/// `Entity` kind that no generated codec supports.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Primitive {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    Float,
    Double,
    String,
    EntityId,
    Bytes,
    Entity,
}

impl Primitive {
    /// Narrow to a supported scalar kind; `None` for the reserved `Entity` kind.
    #[must_use]
    pub const fn scalar(self) -> Option<ScalarKind> {
        Some(match self {
            Self::Int32 => ScalarKind::Int32,
            Self::Int64 => ScalarKind::Int64,
            Self::Uint32 => ScalarKind::Uint32,
            Self::Uint64 => ScalarKind::Uint64,
            Self::Sint32 => ScalarKind::Sint32,
            Self::Sint64 => ScalarKind::Sint64,
            Self::Fixed32 => ScalarKind::Fixed32,
            Self::Fixed64 => ScalarKind::Fixed64,
            Self::Sfixed32 => ScalarKind::Sfixed32,
            Self::Sfixed64 => ScalarKind::Sfixed64,
            Self::Bool => ScalarKind::Bool,
            Self::Float => ScalarKind::Float,
            Self::Double => ScalarKind::Double,
            Self::String => ScalarKind::String,
            Self::EntityId => ScalarKind::EntityId,
            Self::Bytes => ScalarKind::Bytes,
            Self::Entity => return None,
        })
    }

    #[must_use]
    pub const fn is_entity(self) -> bool {
        matches!(self, Self::Entity)
    }
}

///
/// ScalarKind
///
/// Every primitive kind a generated codec can carry on the wire.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum ScalarKind {
    Bool,
    Bytes,
    Double,
    EntityId,
    Fixed32,
    Fixed64,
    Float,
    Int32,
    Int64,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    String,
    Uint32,
    Uint64,
}

impl ScalarKind {
    pub const ALL: [Self; 16] = [
        Self::Bool,
        Self::Bytes,
        Self::Double,
        Self::EntityId,
        Self::Fixed32,
        Self::Fixed64,
        Self::Float,
        Self::Int32,
        Self::Int64,
        Self::Sfixed32,
        Self::Sfixed64,
        Self::Sint32,
        Self::Sint64,
        Self::String,
        Self::Uint32,
        Self::Uint64,
    ];

    // the two kinds whose own representation already admits "no value"
    #[must_use]
    pub const fn can_be_null(self) -> bool {
        matches!(self, Self::String | Self::Bytes)
    }

    #[must_use]
    pub const fn is_copy(self) -> bool {
        !self.can_be_null()
    }

    /// Snake-case stem used to build wire operation names (`get_<stem>`).
    #[must_use]
    pub const fn op_stem(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Double => "double",
            Self::EntityId => "entity_id",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Float => "float",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::String => "string",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_is_the_only_unsupported_primitive() {
        assert!(Primitive::Entity.scalar().is_none());
        assert_eq!(Primitive::EntityId.scalar(), Some(ScalarKind::EntityId));
        assert_eq!(Primitive::Sfixed64.scalar(), Some(ScalarKind::Sfixed64));
    }

    #[test]
    fn only_string_and_bytes_can_be_null() {
        let nullable: Vec<_> = ScalarKind::ALL
            .into_iter()
            .filter(|k| k.can_be_null())
            .collect();

        assert_eq!(nullable, vec![ScalarKind::Bytes, ScalarKind::String]);
    }

    #[test]
    fn primitive_deserializes_from_variant_name() {
        let p: Primitive = serde_json::from_str("\"EntityId\"").expect("primitive should parse");
        assert_eq!(p, Primitive::EntityId);
    }
}
