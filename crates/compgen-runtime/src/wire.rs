//! Wire container boundary.
//!
//! A schema object is addressed by small positive field ids; each field
//! holds zero or more values of one wire kind. Implementations live outside
//! this crate (the network SDK); `memory` provides one for tests and tools.

use crate::{EntityId, FieldId};

// scalar_methods
// declares the count / get / index / add quadruple for one copyable kind
macro_rules! scalar_methods {
    ($($count:ident, $get:ident, $index:ident, $add:ident: $ty:ty;)*) => {
        $(
            fn $count(&self, field: FieldId) -> u32;
            fn $get(&self, field: FieldId) -> $ty;
            fn $index(&self, field: FieldId, index: u32) -> $ty;
            fn $add(&mut self, field: FieldId, value: $ty);
        )*
    };
}

///
/// SchemaObject
///
/// `get_*` returns the last value written to a field (or the kind's zero
/// value); `index_*` returns the n-th value.
///

pub trait SchemaObject: Sized {
    scalar_methods! {
        bool_count, get_bool, index_bool, add_bool: bool;
        double_count, get_double, index_double, add_double: f64;
        entity_id_count, get_entity_id, index_entity_id, add_entity_id: EntityId;
        fixed32_count, get_fixed32, index_fixed32, add_fixed32: u32;
        fixed64_count, get_fixed64, index_fixed64, add_fixed64: u64;
        float_count, get_float, index_float, add_float: f32;
        int32_count, get_int32, index_int32, add_int32: i32;
        int64_count, get_int64, index_int64, add_int64: i64;
        sfixed32_count, get_sfixed32, index_sfixed32, add_sfixed32: i32;
        sfixed64_count, get_sfixed64, index_sfixed64, add_sfixed64: i64;
        sint32_count, get_sint32, index_sint32, add_sint32: i32;
        sint64_count, get_sint64, index_sint64, add_sint64: i64;
        uint32_count, get_uint32, index_uint32, add_uint32: u32;
        uint64_count, get_uint64, index_uint64, add_uint64: u64;
    }

    // string
    fn string_count(&self, field: FieldId) -> u32;
    fn get_string(&self, field: FieldId) -> &str;
    fn index_string(&self, field: FieldId, index: u32) -> &str;
    fn add_string(&mut self, field: FieldId, value: &str);

    // bytes
    fn bytes_count(&self, field: FieldId) -> u32;
    fn get_bytes(&self, field: FieldId) -> &[u8];
    fn index_bytes(&self, field: FieldId, index: u32) -> &[u8];
    fn add_bytes(&mut self, field: FieldId, value: &[u8]);

    // enum values travel as unsigned integers
    fn enum_count(&self, field: FieldId) -> u32;
    fn get_enum(&self, field: FieldId) -> u32;
    fn index_enum(&self, field: FieldId, index: u32) -> u32;
    fn add_enum(&mut self, field: FieldId, value: u32);

    // nested objects
    fn object_count(&self, field: FieldId) -> u32;
    fn get_object(&self, field: FieldId) -> &Self;
    fn index_object(&self, field: FieldId, index: u32) -> &Self;
    fn add_object(&mut self, field: FieldId) -> &mut Self;

    /// Distinct field ids holding at least one value, ascending.
    fn field_ids(&self) -> Vec<FieldId>;
}

///
/// SchemaUpdate
///
/// A component update: field writes, event appends, and the set of field
/// ids explicitly reset to their default.
///

pub trait SchemaUpdate {
    type Object: SchemaObject;

    fn fields(&self) -> &Self::Object;
    fn fields_mut(&mut self) -> &mut Self::Object;

    fn events(&self) -> &Self::Object;
    fn events_mut(&mut self) -> &mut Self::Object;

    fn cleared_fields(&self) -> &[FieldId];
    fn add_cleared_field(&mut self, field: FieldId);

    fn is_cleared(&self, field: FieldId) -> bool {
        self.cleared_fields().contains(&field)
    }
}
