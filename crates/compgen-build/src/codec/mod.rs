//! Codec plans and their back-ends.
//!
//! A `TypeCodec` pairs a resolved type with the classification of each
//! retained field. `emit` turns the plan into Rust tokens; `dynamic`
//! interprets the same plan directly against a wire container.

pub mod dynamic;
mod emit;
mod enums;
pub mod naming;

pub use emit::emit_type;
pub use enums::emit_enum;

use crate::{
    classify::{FieldClass, classify},
    resolve::{ResolvedField, ResolvedType},
};
use compgen_schema::types::FieldId;
use std::sync::Arc;

///
/// FieldCodec
///

#[derive(Clone, Debug)]
pub struct FieldCodec {
    pub field: ResolvedField,
    pub class: FieldClass,
}

impl FieldCodec {
    #[must_use]
    pub fn new(field: &ResolvedField) -> Self {
        Self {
            class: classify(field),
            field: field.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.field.name
    }

    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.field.field_id
    }
}

///
/// TypeCodec
///

#[derive(Clone, Debug)]
pub struct TypeCodec {
    pub ty: Arc<ResolvedType>,
    pub fields: Vec<FieldCodec>,
}

impl TypeCodec {
    #[must_use]
    pub fn new(ty: Arc<ResolvedType>) -> Self {
        let fields = ty.fields.iter().map(FieldCodec::new).collect();

        Self { ty, fields }
    }

    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.ty.qualified_name
    }

    #[must_use]
    pub fn component_id(&self) -> Option<u32> {
        self.ty.component_id
    }

    /// Updaters, update builders and response senders exist only for
    /// non-restricted components.
    #[must_use]
    pub fn supports_updates(&self) -> bool {
        self.ty.component_id.is_some() && !self.ty.restricted
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldCodec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    #[must_use]
    pub fn field_by_id(&self, id: FieldId) -> Option<&FieldCodec> {
        self.fields.iter().find(|f| f.id() == id)
    }
}

///
/// TESTS
///
