//! Field classification: a total mapping from (shape, value kind, scalar
//! kind) to the wire operations, option representation, collection
//! materialization and empty value of a retained field.

use crate::resolve::{ResolvedField, ResolvedShape, ValueKind};
use compgen_schema::types::ScalarKind;

///
/// WireOps
/// the four container operations for one element kind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WireOps {
    pub count: &'static str,
    pub get: &'static str,
    pub index: &'static str,
    pub add: &'static str,
}

macro_rules! ops {
    ($stem:literal) => {
        WireOps {
            count: concat!($stem, "_count"),
            get: concat!("get_", $stem),
            index: concat!("index_", $stem),
            add: concat!("add_", $stem),
        }
    };
}

/// Operations shared by every enum field; values travel as `u32`.
pub const ENUM_OPS: WireOps = ops!("enum");

/// Operations shared by every named-type field; values are nested objects.
pub const OBJECT_OPS: WireOps = ops!("object");

/// Operations for a scalar kind.
#[must_use]
pub const fn scalar_ops(kind: ScalarKind) -> WireOps {
    match kind {
        ScalarKind::Bool => ops!("bool"),
        ScalarKind::Bytes => ops!("bytes"),
        ScalarKind::Double => ops!("double"),
        ScalarKind::EntityId => ops!("entity_id"),
        ScalarKind::Fixed32 => ops!("fixed32"),
        ScalarKind::Fixed64 => ops!("fixed64"),
        ScalarKind::Float => ops!("float"),
        ScalarKind::Int32 => ops!("int32"),
        ScalarKind::Int64 => ops!("int64"),
        ScalarKind::Sfixed32 => ops!("sfixed32"),
        ScalarKind::Sfixed64 => ops!("sfixed64"),
        ScalarKind::Sint32 => ops!("sint32"),
        ScalarKind::Sint64 => ops!("sint64"),
        ScalarKind::String => ops!("string"),
        ScalarKind::Uint32 => ops!("uint32"),
        ScalarKind::Uint64 => ops!("uint64"),
    }
}

///
/// WireClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WireClass {
    Scalar(ScalarKind),
    Enum,
    Object,
}

///
/// ElementClass
/// one element of a field: the whole value, a list item, a map key or value
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElementClass {
    pub kind: ValueKind,
    pub wire: WireClass,
    pub ops: WireOps,
}

impl ElementClass {
    #[must_use]
    pub fn of(kind: &ValueKind) -> Self {
        let (wire, ops) = match kind {
            ValueKind::Scalar(k) => (WireClass::Scalar(*k), scalar_ops(*k)),
            ValueKind::Enum(_) => (WireClass::Enum, ENUM_OPS),
            ValueKind::Named(_) => (WireClass::Object, OBJECT_OPS),
        };

        Self {
            kind: kind.clone(),
            wire,
            ops,
        }
    }

    /// Elements passed by reference in updater signatures (`&str`, `&[u8]`,
    /// `&T`); everything else is `Copy` and passed by value.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        match self.wire {
            WireClass::Scalar(k) => !k.is_copy(),
            WireClass::Enum => false,
            WireClass::Object => true,
        }
    }
}

///
/// OptionRepr
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionRepr {
    /// The element's own representation admits "no value" (string, bytes).
    NullReference,

    /// An explicit present/absent wrapper.
    Presence,
}

///
/// Materialization
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Materialization {
    /// Immutable shared collection (`List`, `Map`).
    Persistent,

    /// Growable collection (`Vec`, `MapBuf`), for fields that recurse
    /// through the collection.
    Growable,
}

///
/// EmptyValue
/// what a field holds when default-constructed or cleared
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmptyValue {
    Zero,
    Absent,
    EmptyCollection,
}

///
/// FieldClass
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldClass {
    Singular(ElementClass),
    Option {
        element: ElementClass,
        repr: OptionRepr,
    },
    List {
        element: ElementClass,
        materialization: Materialization,
    },
    Map {
        key: ElementClass,
        value: ElementClass,
        materialization: Materialization,
    },
}

impl FieldClass {
    #[must_use]
    pub const fn empty(&self) -> EmptyValue {
        match self {
            Self::Singular(_) => EmptyValue::Zero,
            Self::Option { .. } => EmptyValue::Absent,
            Self::List { .. } | Self::Map { .. } => EmptyValue::EmptyCollection,
        }
    }

    /// The element whose operations address the field itself; map fields
    /// are addressed as objects (one pair object per entry).
    #[must_use]
    pub const fn field_ops(&self) -> WireOps {
        match self {
            Self::Singular(e) | Self::Option { element: e, .. } | Self::List { element: e, .. } => {
                e.ops
            }
            Self::Map { .. } => OBJECT_OPS,
        }
    }
}

// classify
#[must_use]
pub fn classify(field: &ResolvedField) -> FieldClass {
    let materialization = if field.recursive {
        Materialization::Growable
    } else {
        Materialization::Persistent
    };

    match &field.shape {
        ResolvedShape::Singular(kind) => FieldClass::Singular(ElementClass::of(kind)),
        ResolvedShape::Option(kind) => FieldClass::Option {
            element: ElementClass::of(kind),
            repr: option_repr(kind),
        },
        ResolvedShape::List(kind) => FieldClass::List {
            element: ElementClass::of(kind),
            materialization,
        },
        ResolvedShape::Map { key, value } => FieldClass::Map {
            key: ElementClass::of(key),
            value: ElementClass::of(value),
            materialization,
        },
    }
}

// option_repr
const fn option_repr(kind: &ValueKind) -> OptionRepr {
    match kind {
        ValueKind::Scalar(ScalarKind::String | ScalarKind::Bytes) => OptionRepr::NullReference,
        ValueKind::Scalar(
            ScalarKind::Bool
            | ScalarKind::Double
            | ScalarKind::EntityId
            | ScalarKind::Fixed32
            | ScalarKind::Fixed64
            | ScalarKind::Float
            | ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::Sfixed32
            | ScalarKind::Sfixed64
            | ScalarKind::Sint32
            | ScalarKind::Sint64
            | ScalarKind::Uint32
            | ScalarKind::Uint64,
        )
        | ValueKind::Enum(_)
        | ValueKind::Named(_) => OptionRepr::Presence,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn field(shape: ResolvedShape) -> ResolvedField {
        ResolvedField {
            name: "f".to_string(),
            field_id: 1,
            shape,
            recursive: false,
            transient: false,
            annotations: Vec::new(),
        }
    }

    #[test]
    fn only_string_and_bytes_options_are_null_references() {
        for kind in ScalarKind::ALL {
            let class = classify(&field(ResolvedShape::Option(ValueKind::Scalar(kind))));
            let FieldClass::Option { repr, .. } = class else {
                panic!("option shape must classify as option");
            };

            let expected = if kind.can_be_null() {
                OptionRepr::NullReference
            } else {
                OptionRepr::Presence
            };
            assert_eq!(repr, expected, "{kind}");
        }

        for kind in [
            ValueKind::Enum("p.E".to_string()),
            ValueKind::Named("p.T".to_string()),
        ] {
            let class = classify(&field(ResolvedShape::Option(kind)));
            assert!(matches!(
                class,
                FieldClass::Option {
                    repr: OptionRepr::Presence,
                    ..
                }
            ));
        }
    }

    #[test]
    fn ops_follow_the_value_kind() {
        let scalar = classify(&field(ResolvedShape::Singular(ValueKind::Scalar(
            ScalarKind::Sfixed64,
        ))));
        assert_eq!(scalar.field_ops().get, "get_sfixed64");

        let named = classify(&field(ResolvedShape::List(ValueKind::Named("p.T".into()))));
        assert_eq!(named.field_ops().count, "object_count");

        let en = classify(&field(ResolvedShape::Singular(ValueKind::Enum("p.E".into()))));
        assert_eq!(en.field_ops().add, "add_enum");
    }

    #[test]
    fn scalar_ops_match_the_kind_stem() {
        for kind in ScalarKind::ALL {
            let ops = scalar_ops(kind);
            assert_eq!(ops.get, format!("get_{}", kind.op_stem()));
            assert_eq!(ops.count, format!("{}_count", kind.op_stem()));
        }
    }

    #[test]
    fn maps_are_addressed_as_pair_objects() {
        let class = classify(&field(ResolvedShape::Map {
            key: ValueKind::Scalar(ScalarKind::String),
            value: ValueKind::Scalar(ScalarKind::Int32),
        }));

        assert_eq!(class.field_ops(), OBJECT_OPS);
        assert_eq!(class.empty(), EmptyValue::EmptyCollection);
    }

    #[test]
    fn recursive_collections_are_growable() {
        let mut f = field(ResolvedShape::List(ValueKind::Named("p.T".into())));
        f.recursive = true;

        assert!(matches!(
            classify(&f),
            FieldClass::List {
                materialization: Materialization::Growable,
                ..
            }
        ));
    }

    #[test]
    fn empty_values_per_shape() {
        let kind = ValueKind::Scalar(ScalarKind::Bool);

        assert_eq!(
            classify(&field(ResolvedShape::Singular(kind.clone()))).empty(),
            EmptyValue::Zero
        );
        assert_eq!(
            classify(&field(ResolvedShape::Option(kind))).empty(),
            EmptyValue::Absent
        );
    }
}
