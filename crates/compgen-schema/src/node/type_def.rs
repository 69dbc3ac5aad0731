use crate::node::{Annotation, FieldDefinition, SourceReference, empty_as_none, short_name};
use serde::Deserialize;

///
/// TypeDefinition
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeDefinition {
    pub name: String,
    pub qualified_name: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub outer_type: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub source_reference: SourceReference,
}

impl TypeDefinition {
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();

        Self {
            name: short_name(&qualified_name).to_string(),
            qualified_name,
            outer_type: None,
            fields: Vec::new(),
            annotations: Vec::new(),
            source_reference: SourceReference::default(),
        }
    }

    #[must_use]
    pub fn nested_in(mut self, outer: impl Into<String>) -> Self {
        self.outer_type = Some(outer.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}
