use crate::node::{Annotation, SourceReference, empty_as_none, short_name};
use serde::Deserialize;

///
/// EnumDefinition
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnumDefinition {
    pub name: String,
    pub qualified_name: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub outer_type: Option<String>,

    #[serde(default)]
    pub values: Vec<EnumValueDefinition>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub source_reference: SourceReference,
}

impl EnumDefinition {
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();

        Self {
            name: short_name(&qualified_name).to_string(),
            qualified_name,
            outer_type: None,
            values: Vec::new(),
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
    pub fn with_value(mut self, name: impl Into<String>, value: u32) -> Self {
        self.values.push(EnumValueDefinition {
            name: name.into(),
            value,
            annotations: Vec::new(),
            source_reference: SourceReference::default(),
        });
        self
    }

    /// The value a default-constructed enum takes: the one declared as 0,
    /// else the first declared value.
    #[must_use]
    pub fn default_value(&self) -> Option<&EnumValueDefinition> {
        self.values
            .iter()
            .find(|v| v.value == 0)
            .or_else(|| self.values.first())
    }
}

///
/// EnumValueDefinition
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnumValueDefinition {
    pub name: String,
    pub value: u32,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub source_reference: SourceReference,
}
