//! Data-driven codec over the same `TypeCodec` plans the emitter consumes.
//!
//! Values are held as untyped records keyed by field id, so the decode,
//! encode, updater and merge behaviour of generated code can be exercised
//! without compiling it.

use super::{FieldCodec, TypeCodec};
use crate::{
    classify::{ElementClass, FieldClass, WireClass},
    resolve::{ResolvedEnum, ResolvedType, ValueKind},
};
use compgen_runtime::{
    DecodeError, EntityId, MAP_KEY_FIELD_ID, MAP_VALUE_FIELD_ID, SchemaEq, SchemaHash,
    SchemaObject, SchemaUpdate,
    eq::{entries_eq, entries_hash},
};
use compgen_schema::types::{FieldId, ScalarKind};
use std::{
    collections::BTreeMap,
    hash::{DefaultHasher, Hasher},
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// DynamicError
///

#[derive(Debug, ThisError)]
pub enum DynamicError {
    #[error("no codec for type '{0}'")]
    UnknownType(String),

    #[error("no definition for enum '{0}'")]
    UnknownEnum(String),

    #[error("'{type_name}' has no field with id {field_id}")]
    UnknownField { type_name: String, field_id: FieldId },

    #[error("'{type_name}' has no event '{event}'")]
    UnknownEvent { type_name: String, event: String },

    #[error("record for '{type_name}' has no value for field '{field}'")]
    MissingValue { type_name: String, field: String },

    #[error("value for field '{field}' does not match its declared kind")]
    ShapeMismatch { field: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl DynamicError {
    // with_field
    // decode failures carry the field path, like generated code
    fn with_field(self, field: &str) -> Self {
        match self {
            Self::Decode(err) => Self::Decode(err.with_field(field)),
            other => other,
        }
    }
}

///
/// Value
/// one element: a scalar, an enum discriminant or a nested record
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Bytes(Vec<u8>),
    Double(f64),
    EntityId(EntityId),
    Fixed32(u32),
    Fixed64(u64),
    Float(f32),
    Int32(i32),
    Int64(i64),
    Sfixed32(i32),
    Sfixed64(i64),
    Sint32(i32),
    Sint64(i64),
    String(String),
    Uint32(u32),
    Uint64(u64),
    Enum(u32),
    Object(Record),
}

impl Value {
    /// The zero value of a scalar kind.
    #[must_use]
    pub const fn zero(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::Bytes => Self::Bytes(Vec::new()),
            ScalarKind::Double => Self::Double(0.0),
            ScalarKind::EntityId => Self::EntityId(EntityId(0)),
            ScalarKind::Fixed32 => Self::Fixed32(0),
            ScalarKind::Fixed64 => Self::Fixed64(0),
            ScalarKind::Float => Self::Float(0.0),
            ScalarKind::Int32 => Self::Int32(0),
            ScalarKind::Int64 => Self::Int64(0),
            ScalarKind::Sfixed32 => Self::Sfixed32(0),
            ScalarKind::Sfixed64 => Self::Sfixed64(0),
            ScalarKind::Sint32 => Self::Sint32(0),
            ScalarKind::Sint64 => Self::Sint64(0),
            ScalarKind::String => Self::String(String::new()),
            ScalarKind::Uint32 => Self::Uint32(0),
            ScalarKind::Uint64 => Self::Uint64(0),
        }
    }

    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        Some(match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Bytes(_) => ScalarKind::Bytes,
            Self::Double(_) => ScalarKind::Double,
            Self::EntityId(_) => ScalarKind::EntityId,
            Self::Fixed32(_) => ScalarKind::Fixed32,
            Self::Fixed64(_) => ScalarKind::Fixed64,
            Self::Float(_) => ScalarKind::Float,
            Self::Int32(_) => ScalarKind::Int32,
            Self::Int64(_) => ScalarKind::Int64,
            Self::Sfixed32(_) => ScalarKind::Sfixed32,
            Self::Sfixed64(_) => ScalarKind::Sfixed64,
            Self::Sint32(_) => ScalarKind::Sint32,
            Self::Sint64(_) => ScalarKind::Sint64,
            Self::String(_) => ScalarKind::String,
            Self::Uint32(_) => ScalarKind::Uint32,
            Self::Uint64(_) => ScalarKind::Uint64,
            Self::Enum(_) | Self::Object(_) => return None,
        })
    }

    const fn tag(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Bytes(_) => 1,
            Self::Double(_) => 2,
            Self::EntityId(_) => 3,
            Self::Fixed32(_) => 4,
            Self::Fixed64(_) => 5,
            Self::Float(_) => 6,
            Self::Int32(_) => 7,
            Self::Int64(_) => 8,
            Self::Sfixed32(_) => 9,
            Self::Sfixed64(_) => 10,
            Self::Sint32(_) => 11,
            Self::Sint64(_) => 12,
            Self::String(_) => 13,
            Self::Uint32(_) => 14,
            Self::Uint64(_) => 15,
            Self::Enum(_) => 16,
            Self::Object(_) => 17,
        }
    }
}

impl SchemaEq for Value {
    fn schema_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.schema_eq(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.schema_eq(b),
            (Self::Double(a), Self::Double(b)) => a.schema_eq(b),
            (Self::EntityId(a), Self::EntityId(b)) => a.schema_eq(b),
            (Self::Float(a), Self::Float(b)) => a.schema_eq(b),
            (Self::Int32(a), Self::Int32(b))
            | (Self::Sfixed32(a), Self::Sfixed32(b))
            | (Self::Sint32(a), Self::Sint32(b)) => a.schema_eq(b),
            (Self::Int64(a), Self::Int64(b))
            | (Self::Sfixed64(a), Self::Sfixed64(b))
            | (Self::Sint64(a), Self::Sint64(b)) => a.schema_eq(b),
            (Self::String(a), Self::String(b)) => a.schema_eq(b),
            (Self::Fixed32(a), Self::Fixed32(b))
            | (Self::Uint32(a), Self::Uint32(b))
            | (Self::Enum(a), Self::Enum(b)) => a.schema_eq(b),
            (Self::Fixed64(a), Self::Fixed64(b)) | (Self::Uint64(a), Self::Uint64(b)) => {
                a.schema_eq(b)
            }
            (Self::Object(a), Self::Object(b)) => record_eq(a, b),
            _ => false,
        }
    }
}

impl SchemaHash for Value {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());

        match self {
            Self::Bool(v) => v.schema_hash(state),
            Self::Bytes(v) => v.schema_hash(state),
            Self::Double(v) => v.schema_hash(state),
            Self::EntityId(v) => v.schema_hash(state),
            Self::Float(v) => v.schema_hash(state),
            Self::Int32(v) | Self::Sfixed32(v) | Self::Sint32(v) => v.schema_hash(state),
            Self::Int64(v) | Self::Sfixed64(v) | Self::Sint64(v) => v.schema_hash(state),
            Self::String(v) => v.schema_hash(state),
            Self::Fixed32(v) | Self::Uint32(v) | Self::Enum(v) => v.schema_hash(state),
            Self::Fixed64(v) | Self::Uint64(v) => v.schema_hash(state),
            Self::Object(record) => hash_record(record, state),
        }
    }
}

///
/// FieldValue
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Singular(Value),
    Option(Option<Value>),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl FieldValue {
    // matches
    // shape agreement with a classified field, elements are checked on write
    const fn matches(&self, class: &FieldClass) -> bool {
        matches!(
            (self, class),
            (Self::Singular(_), FieldClass::Singular(_))
                | (Self::Option(_), FieldClass::Option { .. })
                | (Self::List(_), FieldClass::List { .. })
                | (Self::Map(_), FieldClass::Map { .. })
        )
    }

    // is_empty
    // values that an updater turns into a clear
    const fn is_empty(&self) -> bool {
        match self {
            Self::Singular(_) => false,
            Self::Option(v) => v.is_none(),
            Self::List(v) => v.is_empty(),
            Self::Map(v) => v.is_empty(),
        }
    }
}

impl SchemaEq for FieldValue {
    fn schema_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Singular(a), Self::Singular(b)) => a.schema_eq(b),
            (Self::Option(a), Self::Option(b)) => a.schema_eq(b),
            (Self::List(a), Self::List(b)) => a.schema_eq(b),
            (Self::Map(a), Self::Map(b)) => entries_eq(a, b),
            _ => false,
        }
    }
}

impl SchemaHash for FieldValue {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Singular(v) => v.schema_hash(state),
            Self::Option(v) => v.schema_hash(state),
            Self::List(v) => v.schema_hash(state),
            Self::Map(v) => entries_hash(v, state),
        }
    }
}

/// A decoded value of a named type, keyed by field id.
pub type Record = BTreeMap<FieldId, FieldValue>;

/// Structural equality over records, with the float and map rules of
/// generated code.
#[must_use]
pub fn record_eq(a: &Record, b: &Record) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(id, va)| b.get(id).is_some_and(|vb| va.schema_eq(vb)))
}

#[must_use]
pub fn record_hash(record: &Record) -> u64 {
    let mut state = DefaultHasher::new();
    hash_record(record, &mut state);

    state.finish()
}

fn hash_record<H: Hasher>(record: &Record, state: &mut H) {
    state.write_usize(record.len());
    for (id, value) in record {
        state.write_u32(*id);
        value.schema_hash(state);
    }
}

///
/// Dynamic
///

#[derive(Clone, Debug, Default)]
pub struct Dynamic {
    codecs: BTreeMap<String, TypeCodec>,
    enums: BTreeMap<String, ResolvedEnum>,
}

impl Dynamic {
    /// Build codecs for the given types, their nested types and enums.
    #[must_use]
    pub fn new(types: &[Arc<ResolvedType>], enums: &[ResolvedEnum]) -> Self {
        let mut codecs = BTreeMap::new();
        let mut all_enums: BTreeMap<String, ResolvedEnum> = enums
            .iter()
            .map(|e| (e.qualified_name.clone(), e.clone()))
            .collect();

        let mut stack = types.to_vec();
        while let Some(ty) = stack.pop() {
            stack.extend(ty.nested_types.iter().cloned());
            for e in &ty.nested_enums {
                all_enums
                    .entry(e.qualified_name.clone())
                    .or_insert_with(|| e.clone());
            }
            codecs
                .entry(ty.qualified_name.clone())
                .or_insert_with(|| TypeCodec::new(ty));
        }

        Self {
            codecs,
            enums: all_enums,
        }
    }

    pub fn codec(&self, type_name: &str) -> Result<&TypeCodec, DynamicError> {
        self.codecs
            .get(type_name)
            .ok_or_else(|| DynamicError::UnknownType(type_name.to_string()))
    }

    //
    // decode
    //

    pub fn decode<O: SchemaObject>(&self, type_name: &str, obj: &O) -> Result<Record, DynamicError> {
        let codec = self.codec(type_name)?;

        codec
            .fields
            .iter()
            .map(|field| Ok((field.id(), self.decode_field(codec, field, obj)?)))
            .collect()
    }

    fn decode_field<O: SchemaObject>(
        &self,
        codec: &TypeCodec,
        field: &FieldCodec,
        obj: &O,
    ) -> Result<FieldValue, DynamicError> {
        let id = field.id();
        let count = field_count(obj, &field.class, id);

        if count == 0 && matches!(field.class, FieldClass::Singular(_)) {
            return Err(DecodeError::MissingField {
                type_name: codec.qualified_name().to_string(),
                field: field.name().to_string(),
                field_id: id,
            }
            .into());
        }

        self.read_field(&field.class, obj, id, count)
            .map_err(|err| err.with_field(field.name()))
    }

    fn read_field<O: SchemaObject>(
        &self,
        class: &FieldClass,
        obj: &O,
        id: FieldId,
        count: u32,
    ) -> Result<FieldValue, DynamicError> {
        Ok(match class {
            FieldClass::Singular(element) => FieldValue::Singular(self.read(obj, element, id, None)?),
            FieldClass::Option { element, .. } => FieldValue::Option(if count > 0 {
                Some(self.read(obj, element, id, None)?)
            } else {
                None
            }),
            FieldClass::List { element, .. } => FieldValue::List(
                (0..count)
                    .map(|i| self.read(obj, element, id, Some(i)))
                    .collect::<Result<_, _>>()?,
            ),
            FieldClass::Map { key, value, .. } => {
                let mut entries: Vec<(Value, Value)> = Vec::with_capacity(count as usize);
                for i in 0..count {
                    let pair = obj.index_object(id, i);
                    let k = self.read(pair, key, MAP_KEY_FIELD_ID, None)?;
                    let v = self.read(pair, value, MAP_VALUE_FIELD_ID, None)?;

                    // a repeated key replaces the earlier entry
                    match entries.iter_mut().find(|(ek, _)| ek.schema_eq(&k)) {
                        Some(entry) => entry.1 = v,
                        None => entries.push((k, v)),
                    }
                }
                FieldValue::Map(entries)
            }
        })
    }

    // read
    // the last value (`index` = None) or the n-th value of one element
    fn read<O: SchemaObject>(
        &self,
        obj: &O,
        element: &ElementClass,
        id: FieldId,
        index: Option<u32>,
    ) -> Result<Value, DynamicError> {
        match &element.kind {
            ValueKind::Scalar(kind) => Ok(read_scalar(obj, *kind, id, index)),
            ValueKind::Enum(name) => {
                let raw = index.map_or_else(|| obj.get_enum(id), |i| obj.index_enum(id, i));
                self.check_enum(name, raw)?;

                Ok(Value::Enum(raw))
            }
            ValueKind::Named(name) => {
                let nested = index.map_or_else(|| obj.get_object(id), |i| obj.index_object(id, i));

                Ok(Value::Object(self.decode(name, nested)?))
            }
        }
    }

    fn check_enum(&self, name: &str, raw: u32) -> Result<(), DynamicError> {
        let en = self
            .enums
            .get(name)
            .ok_or_else(|| DynamicError::UnknownEnum(name.to_string()))?;

        if en.values.iter().any(|v| v.value == raw) {
            Ok(())
        } else {
            Err(DecodeError::UnknownEnumValue {
                enum_name: name.to_string(),
                value: raw,
            }
            .into())
        }
    }

    //
    // encode
    //

    pub fn encode<O: SchemaObject>(
        &self,
        type_name: &str,
        record: &Record,
        obj: &mut O,
    ) -> Result<(), DynamicError> {
        let codec = self.codec(type_name)?;

        for field in &codec.fields {
            let value = record
                .get(&field.id())
                .ok_or_else(|| DynamicError::MissingValue {
                    type_name: type_name.to_string(),
                    field: field.name().to_string(),
                })?;
            self.encode_field(field, value, obj)?;
        }

        Ok(())
    }

    fn encode_field<O: SchemaObject>(
        &self,
        field: &FieldCodec,
        value: &FieldValue,
        obj: &mut O,
    ) -> Result<(), DynamicError> {
        let id = field.id();
        let name = field.name();

        match (&field.class, value) {
            (FieldClass::Singular(element), FieldValue::Singular(v)) => {
                self.write(obj, element, id, v, name)
            }
            (FieldClass::Option { element, .. }, FieldValue::Option(v)) => match v {
                Some(v) => self.write(obj, element, id, v, name),
                None => Ok(()),
            },
            (FieldClass::List { element, .. }, FieldValue::List(items)) => items
                .iter()
                .try_for_each(|v| self.write(obj, element, id, v, name)),
            (FieldClass::Map { key, value, .. }, FieldValue::Map(entries)) => {
                for (k, v) in entries {
                    let pair = obj.add_object(id);
                    self.write(pair, key, MAP_KEY_FIELD_ID, k, name)?;
                    self.write(pair, value, MAP_VALUE_FIELD_ID, v, name)?;
                }
                Ok(())
            }
            _ => Err(DynamicError::ShapeMismatch {
                field: name.to_string(),
            }),
        }
    }

    fn write<O: SchemaObject>(
        &self,
        obj: &mut O,
        element: &ElementClass,
        id: FieldId,
        value: &Value,
        field: &str,
    ) -> Result<(), DynamicError> {
        match (&element.kind, value) {
            (ValueKind::Scalar(kind), v) if v.scalar_kind() == Some(*kind) => {
                write_scalar(obj, id, v);
                Ok(())
            }
            (ValueKind::Enum(_), Value::Enum(raw)) => {
                obj.add_enum(id, *raw);
                Ok(())
            }
            (ValueKind::Named(name), Value::Object(record)) => {
                self.encode(name, record, obj.add_object(id))
            }
            _ => Err(DynamicError::ShapeMismatch {
                field: field.to_string(),
            }),
        }
    }

    //
    // defaults
    //

    /// The default-constructed value of a type.
    pub fn default_record(&self, type_name: &str) -> Result<Record, DynamicError> {
        let codec = self.codec(type_name)?;

        codec
            .fields
            .iter()
            .map(|field| Ok((field.id(), self.empty_field(&field.class)?)))
            .collect()
    }

    // empty_field
    // the value a field holds when default-constructed or cleared
    fn empty_field(&self, class: &FieldClass) -> Result<FieldValue, DynamicError> {
        Ok(match class {
            FieldClass::Singular(element) => FieldValue::Singular(self.empty_element(element)?),
            FieldClass::Option { .. } => FieldValue::Option(None),
            FieldClass::List { .. } => FieldValue::List(Vec::new()),
            FieldClass::Map { .. } => FieldValue::Map(Vec::new()),
        })
    }

    fn empty_element(&self, element: &ElementClass) -> Result<Value, DynamicError> {
        match &element.kind {
            ValueKind::Scalar(kind) => Ok(Value::zero(*kind)),
            ValueKind::Enum(name) => self
                .enums
                .get(name)
                .and_then(ResolvedEnum::default_value)
                .map(|v| Value::Enum(v.value))
                .ok_or_else(|| DynamicError::UnknownEnum(name.to_string())),
            ValueKind::Named(name) => Ok(Value::Object(self.default_record(name)?)),
        }
    }

    //
    // updates
    //

    /// Mirror of a generated `update_<field>`: write the value, or mark the
    /// field cleared when it is absent or empty.
    pub fn update_field<U: SchemaUpdate>(
        &self,
        type_name: &str,
        update: &mut U,
        field_id: FieldId,
        value: &FieldValue,
    ) -> Result<(), DynamicError> {
        let codec = self.codec(type_name)?;
        let field = codec
            .field_by_id(field_id)
            .ok_or_else(|| DynamicError::UnknownField {
                type_name: type_name.to_string(),
                field_id,
            })?;

        if !value.matches(&field.class) {
            return Err(DynamicError::ShapeMismatch {
                field: field.name().to_string(),
            });
        }

        if value.is_empty() {
            update.add_cleared_field(field_id);
            Ok(())
        } else {
            self.encode_field(field, value, update.fields_mut())
        }
    }

    /// Mirror of a generated `apply_update`: written fields replace the
    /// current value, cleared fields reset to empty, the rest is copied.
    pub fn merge<U: SchemaUpdate>(
        &self,
        type_name: &str,
        record: &Record,
        update: &U,
    ) -> Result<Record, DynamicError> {
        let codec = self.codec(type_name)?;
        let fields = update.fields();
        let mut next = record.clone();

        for field in &codec.fields {
            let id = field.id();
            if field_count(fields, &field.class, id) > 0 {
                next.insert(id, self.decode_field(codec, field, fields)?);
            } else if update.is_cleared(id) {
                next.insert(id, self.empty_field(&field.class)?);
            }
        }

        Ok(next)
    }

    /// Every event of one kind in the update, in update order.
    pub fn events<U: SchemaUpdate>(
        &self,
        type_name: &str,
        event: &str,
        update: &U,
    ) -> Result<Vec<Record>, DynamicError> {
        let codec = self.codec(type_name)?;
        let def = codec
            .ty
            .events
            .iter()
            .find(|e| e.name == event)
            .ok_or_else(|| DynamicError::UnknownEvent {
                type_name: type_name.to_string(),
                event: event.to_string(),
            })?;

        let events = update.events();
        (0..events.object_count(def.event_index))
            .map(|i| {
                self.decode(&def.payload_type, events.index_object(def.event_index, i))
                    .map_err(|err| err.with_field(event))
            })
            .collect()
    }

    /// Append one event to an update.
    pub fn add_event<U: SchemaUpdate>(
        &self,
        type_name: &str,
        event: &str,
        update: &mut U,
        payload: &Record,
    ) -> Result<(), DynamicError> {
        let codec = self.codec(type_name)?;
        let def = codec
            .ty
            .events
            .iter()
            .find(|e| e.name == event)
            .ok_or_else(|| DynamicError::UnknownEvent {
                type_name: type_name.to_string(),
                event: event.to_string(),
            })?;

        self.encode(
            &def.payload_type,
            payload,
            update.events_mut().add_object(def.event_index),
        )
    }
}

// field_count
// wire count of the field itself; maps count their pair objects
fn field_count<O: SchemaObject>(obj: &O, class: &FieldClass, id: FieldId) -> u32 {
    let element = match class {
        FieldClass::Singular(e) | FieldClass::Option { element: e, .. } => e,
        FieldClass::List { element, .. } => element,
        FieldClass::Map { .. } => return obj.object_count(id),
    };

    match element.wire {
        WireClass::Scalar(kind) => scalar_count(obj, kind, id),
        WireClass::Enum => obj.enum_count(id),
        WireClass::Object => obj.object_count(id),
    }
}

fn scalar_count<O: SchemaObject>(obj: &O, kind: ScalarKind, id: FieldId) -> u32 {
    match kind {
        ScalarKind::Bool => obj.bool_count(id),
        ScalarKind::Bytes => obj.bytes_count(id),
        ScalarKind::Double => obj.double_count(id),
        ScalarKind::EntityId => obj.entity_id_count(id),
        ScalarKind::Fixed32 => obj.fixed32_count(id),
        ScalarKind::Fixed64 => obj.fixed64_count(id),
        ScalarKind::Float => obj.float_count(id),
        ScalarKind::Int32 => obj.int32_count(id),
        ScalarKind::Int64 => obj.int64_count(id),
        ScalarKind::Sfixed32 => obj.sfixed32_count(id),
        ScalarKind::Sfixed64 => obj.sfixed64_count(id),
        ScalarKind::Sint32 => obj.sint32_count(id),
        ScalarKind::Sint64 => obj.sint64_count(id),
        ScalarKind::String => obj.string_count(id),
        ScalarKind::Uint32 => obj.uint32_count(id),
        ScalarKind::Uint64 => obj.uint64_count(id),
    }
}

fn read_scalar<O: SchemaObject>(
    obj: &O,
    kind: ScalarKind,
    id: FieldId,
    index: Option<u32>,
) -> Value {
    macro_rules! read {
        ($variant:ident, $get:ident, $index:ident) => {
            Value::$variant(match index {
                None => obj.$get(id),
                Some(i) => obj.$index(id, i),
            })
        };
    }

    match kind {
        ScalarKind::Bool => read!(Bool, get_bool, index_bool),
        ScalarKind::Bytes => Value::Bytes(
            match index {
                None => obj.get_bytes(id),
                Some(i) => obj.index_bytes(id, i),
            }
            .to_vec(),
        ),
        ScalarKind::Double => read!(Double, get_double, index_double),
        ScalarKind::EntityId => read!(EntityId, get_entity_id, index_entity_id),
        ScalarKind::Fixed32 => read!(Fixed32, get_fixed32, index_fixed32),
        ScalarKind::Fixed64 => read!(Fixed64, get_fixed64, index_fixed64),
        ScalarKind::Float => read!(Float, get_float, index_float),
        ScalarKind::Int32 => read!(Int32, get_int32, index_int32),
        ScalarKind::Int64 => read!(Int64, get_int64, index_int64),
        ScalarKind::Sfixed32 => read!(Sfixed32, get_sfixed32, index_sfixed32),
        ScalarKind::Sfixed64 => read!(Sfixed64, get_sfixed64, index_sfixed64),
        ScalarKind::Sint32 => read!(Sint32, get_sint32, index_sint32),
        ScalarKind::Sint64 => read!(Sint64, get_sint64, index_sint64),
        ScalarKind::String => Value::String(
            match index {
                None => obj.get_string(id),
                Some(i) => obj.index_string(id, i),
            }
            .to_owned(),
        ),
        ScalarKind::Uint32 => read!(Uint32, get_uint32, index_uint32),
        ScalarKind::Uint64 => read!(Uint64, get_uint64, index_uint64),
    }
}

fn write_scalar<O: SchemaObject>(obj: &mut O, id: FieldId, value: &Value) {
    match value {
        Value::Bool(v) => obj.add_bool(id, *v),
        Value::Bytes(v) => obj.add_bytes(id, v),
        Value::Double(v) => obj.add_double(id, *v),
        Value::EntityId(v) => obj.add_entity_id(id, *v),
        Value::Fixed32(v) => obj.add_fixed32(id, *v),
        Value::Fixed64(v) => obj.add_fixed64(id, *v),
        Value::Float(v) => obj.add_float(id, *v),
        Value::Int32(v) => obj.add_int32(id, *v),
        Value::Int64(v) => obj.add_int64(id, *v),
        Value::Sfixed32(v) => obj.add_sfixed32(id, *v),
        Value::Sfixed64(v) => obj.add_sfixed64(id, *v),
        Value::Sint32(v) => obj.add_sint32(id, *v),
        Value::Sint64(v) => obj.add_sint64(id, *v),
        Value::String(v) => obj.add_string(id, v),
        Value::Uint32(v) => obj.add_uint32(id, *v),
        Value::Uint64(v) => obj.add_uint64(id, *v),
        // guarded by the caller
        Value::Enum(_) | Value::Object(_) => {}
    }
}

///
/// TESTS
///
