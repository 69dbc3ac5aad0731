//! In-process `SchemaObject` / `SchemaUpdate` implementations.
//!
//! Values are stored in write order, tagged by wire kind, so a field read
//! with the wrong kind sees no values. Nested objects live in their own
//! list. Used by tests and offline tools; the
//! network SDK supplies its own containers.

use crate::{
    EntityId, FieldId,
    wire::{SchemaObject, SchemaUpdate},
};

///
/// Entry
///

#[derive(Clone, Debug, PartialEq)]
enum Entry {
    Bool(bool),
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
    Uint32(u32),
    Uint64(u64),
    String(String),
    Bytes(Vec<u8>),
    Enum(u32),
}

static EMPTY: MemoryObject = MemoryObject::new();

///
/// MemoryObject
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryObject {
    entries: Vec<(FieldId, Entry)>,
    objects: Vec<(FieldId, MemoryObject)>,
}

impl MemoryObject {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            objects: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.objects.is_empty()
    }

    // values
    fn values(&self, field: FieldId) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |(id, _)| *id == field)
            .map(|(_, entry)| entry)
    }

    // objects
    fn objects(&self, field: FieldId) -> impl Iterator<Item = &Self> {
        self.objects
            .iter()
            .filter(move |(id, _)| *id == field)
            .map(|(_, object)| object)
    }
}

// memory_scalar_methods
macro_rules! memory_scalar_methods {
    ($($count:ident, $get:ident, $index:ident, $add:ident: $variant:ident($ty:ty);)*) => {
        $(
            fn $count(&self, field: FieldId) -> u32 {
                let n = self
                    .values(field)
                    .filter(|entry| matches!(entry, Entry::$variant(_)))
                    .count();

                u32::try_from(n).unwrap_or(u32::MAX)
            }

            fn $get(&self, field: FieldId) -> $ty {
                self.values(field)
                    .filter_map(|entry| match entry {
                        Entry::$variant(v) => Some(*v),
                        _ => None,
                    })
                    .last()
                    .unwrap_or_default()
            }

            fn $index(&self, field: FieldId, index: u32) -> $ty {
                self.values(field)
                    .filter_map(|entry| match entry {
                        Entry::$variant(v) => Some(*v),
                        _ => None,
                    })
                    .nth(index as usize)
                    .unwrap_or_default()
            }

            fn $add(&mut self, field: FieldId, value: $ty) {
                self.entries.push((field, Entry::$variant(value)));
            }
        )*
    };
}

impl SchemaObject for MemoryObject {
    memory_scalar_methods! {
        bool_count, get_bool, index_bool, add_bool: Bool(bool);
        double_count, get_double, index_double, add_double: Double(f64);
        entity_id_count, get_entity_id, index_entity_id, add_entity_id: EntityId(EntityId);
        fixed32_count, get_fixed32, index_fixed32, add_fixed32: Fixed32(u32);
        fixed64_count, get_fixed64, index_fixed64, add_fixed64: Fixed64(u64);
        float_count, get_float, index_float, add_float: Float(f32);
        int32_count, get_int32, index_int32, add_int32: Int32(i32);
        int64_count, get_int64, index_int64, add_int64: Int64(i64);
        sfixed32_count, get_sfixed32, index_sfixed32, add_sfixed32: Sfixed32(i32);
        sfixed64_count, get_sfixed64, index_sfixed64, add_sfixed64: Sfixed64(i64);
        sint32_count, get_sint32, index_sint32, add_sint32: Sint32(i32);
        sint64_count, get_sint64, index_sint64, add_sint64: Sint64(i64);
        uint32_count, get_uint32, index_uint32, add_uint32: Uint32(u32);
        uint64_count, get_uint64, index_uint64, add_uint64: Uint64(u64);
        enum_count, get_enum, index_enum, add_enum: Enum(u32);
    }

    fn string_count(&self, field: FieldId) -> u32 {
        count_matching(self.values(field), |e| matches!(e, Entry::String(_)))
    }

    fn get_string(&self, field: FieldId) -> &str {
        self.values(field)
            .filter_map(|entry| match entry {
                Entry::String(v) => Some(v.as_str()),
                _ => None,
            })
            .last()
            .unwrap_or_default()
    }

    fn index_string(&self, field: FieldId, index: u32) -> &str {
        self.values(field)
            .filter_map(|entry| match entry {
                Entry::String(v) => Some(v.as_str()),
                _ => None,
            })
            .nth(index as usize)
            .unwrap_or_default()
    }

    fn add_string(&mut self, field: FieldId, value: &str) {
        self.entries.push((field, Entry::String(value.to_string())));
    }

    fn bytes_count(&self, field: FieldId) -> u32 {
        count_matching(self.values(field), |e| matches!(e, Entry::Bytes(_)))
    }

    fn get_bytes(&self, field: FieldId) -> &[u8] {
        self.values(field)
            .filter_map(|entry| match entry {
                Entry::Bytes(v) => Some(v.as_slice()),
                _ => None,
            })
            .last()
            .unwrap_or_default()
    }

    fn index_bytes(&self, field: FieldId, index: u32) -> &[u8] {
        self.values(field)
            .filter_map(|entry| match entry {
                Entry::Bytes(v) => Some(v.as_slice()),
                _ => None,
            })
            .nth(index as usize)
            .unwrap_or_default()
    }

    fn add_bytes(&mut self, field: FieldId, value: &[u8]) {
        self.entries.push((field, Entry::Bytes(value.to_vec())));
    }

    fn object_count(&self, field: FieldId) -> u32 {
        u32::try_from(self.objects(field).count()).unwrap_or(u32::MAX)
    }

    fn get_object(&self, field: FieldId) -> &Self {
        self.objects(field).last().unwrap_or(&EMPTY)
    }

    fn index_object(&self, field: FieldId, index: u32) -> &Self {
        self.objects(field).nth(index as usize).unwrap_or(&EMPTY)
    }

    fn add_object(&mut self, field: FieldId) -> &mut Self {
        let slot = self.objects.len();
        self.objects.push((field, Self::new()));

        &mut self.objects[slot].1
    }

    fn field_ids(&self) -> Vec<FieldId> {
        let mut ids: Vec<FieldId> = self
            .entries
            .iter()
            .map(|(id, _)| *id)
            .chain(self.objects.iter().map(|(id, _)| *id))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        ids
    }
}

// count_matching
fn count_matching<'a>(
    values: impl Iterator<Item = &'a Entry>,
    pred: impl Fn(&Entry) -> bool,
) -> u32 {
    u32::try_from(values.filter(|e| pred(e)).count()).unwrap_or(u32::MAX)
}

///
/// MemoryUpdate
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryUpdate {
    fields: MemoryObject,
    events: MemoryObject,
    cleared: Vec<FieldId>,
}

impl MemoryUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaUpdate for MemoryUpdate {
    type Object = MemoryObject;

    fn fields(&self) -> &MemoryObject {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut MemoryObject {
        &mut self.fields
    }

    fn events(&self) -> &MemoryObject {
        &self.events
    }

    fn events_mut(&mut self) -> &mut MemoryObject {
        &mut self.events
    }

    fn cleared_fields(&self) -> &[FieldId] {
        &self.cleared
    }

    fn add_cleared_field(&mut self, field: FieldId) {
        if !self.cleared.contains(&field) {
            self.cleared.push(field);
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
    fn get_returns_last_written_value() {
        let mut obj = MemoryObject::new();
        obj.add_int32(1, 5);
        obj.add_int32(1, 7);

        assert_eq!(obj.int32_count(1), 2);
        assert_eq!(obj.get_int32(1), 7);
        assert_eq!(obj.index_int32(1, 0), 5);
    }

    #[test]
    fn kinds_do_not_alias() {
        let mut obj = MemoryObject::new();
        obj.add_sint32(3, -1);

        assert_eq!(obj.int32_count(3), 0);
        assert_eq!(obj.sint32_count(3), 1);
        assert_eq!(obj.get_int32(3), 0);
    }

    #[test]
    fn missing_values_read_as_zero() {
        let obj = MemoryObject::new();

        assert_eq!(obj.get_string(4), "");
        assert!(obj.get_bytes(4).is_empty());
        assert!(obj.get_object(4).is_empty());
        assert_eq!(obj.get_entity_id(4), EntityId(0));
    }

    #[test]
    fn nested_objects_are_writable() {
        let mut obj = MemoryObject::new();
        obj.add_object(2).add_double(1, 1.5);
        obj.add_object(2).add_double(1, 2.5);

        assert_eq!(obj.object_count(2), 2);
        assert!((obj.index_object(2, 1).get_double(1) - 2.5).abs() < f64::EPSILON);
        assert_eq!(obj.field_ids(), vec![2]);
    }

    #[test]
    fn object_and_scalar_values_share_a_field_id_space() {
        let mut obj = MemoryObject::new();
        obj.add_object(5).add_bool(1, true);
        obj.add_uint32(3, 9);

        assert!(!obj.is_empty());
        assert_eq!(obj.field_ids(), vec![3, 5]);
        assert_eq!(obj.object_count(3), 0);
        assert!(obj.get_object(5).get_bool(1));
    }

    #[test]
    fn cleared_fields_are_unique() {
        let mut update = MemoryUpdate::new();
        update.add_cleared_field(3);
        update.add_cleared_field(3);

        assert_eq!(update.cleared_fields(), &[3]);
        assert!(update.is_cleared(3));
    }
}
