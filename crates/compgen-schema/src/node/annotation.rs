use crate::node::SourceReference;
use serde::Deserialize;

///
/// Annotation
///
/// A schema annotation instance. Annotation payloads are carried verbatim;
/// the generator only ever looks them up by type name.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Annotation {
    #[serde(default)]
    pub source_reference: SourceReference,

    pub type_value: AnnotationValue,
}

impl Annotation {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            source_reference: SourceReference::default(),
            type_value: AnnotationValue {
                type_name: type_name.into(),
                fields: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_value.type_name
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.type_value
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

///
/// AnnotationValue
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnnotationValue {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub fields: Vec<AnnotationField>,
}

///
/// AnnotationField
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnnotationField {
    pub name: String,

    #[serde(default)]
    pub source_reference: SourceReference,

    pub value: serde_json::Value,
}

/// True when any annotation in the list has the given type name.
#[must_use]
pub fn has_annotation(annotations: &[Annotation], type_name: &str) -> bool {
    annotations.iter().any(|a| a.type_name() == type_name)
}
