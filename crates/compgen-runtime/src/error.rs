use crate::FieldId;
use thiserror::Error as ThisError;

///
/// DecodeError
///
/// Raised when a wire object cannot be turned into a value. Nested decode
/// failures are wrapped with the field path that led to them.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("missing required field '{type_name}.{field}' (id {field_id})")]
    MissingField {
        type_name: String,
        field: String,
        field_id: FieldId,
    },

    #[error("unknown value {value} for enum '{enum_name}'")]
    UnknownEnumValue { enum_name: String, value: u32 },

    #[error("at '{path}': {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },
}

impl DecodeError {
    /// Prefix the error with a field name, joining nested context with `.`.
    #[must_use]
    pub fn with_field(self, field: &str) -> Self {
        match self {
            Self::Context { path, source } => Self::Context {
                path: format!("{field}.{path}"),
                source,
            },
            other => Self::Context {
                path: field.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with all path context removed.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            other => other,
        }
    }

    /// The field path leading to the failure, if any was recorded.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Context { path, .. } => Some(path),
            _ => None,
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
    fn nested_context_builds_dotted_path() {
        let err = DecodeError::UnknownEnumValue {
            enum_name: "pkg.Color".to_string(),
            value: 9,
        }
        .with_field("color")
        .with_field("paint");

        assert_eq!(err.path(), Some("paint.color"));
        assert!(matches!(
            err.leaf(),
            DecodeError::UnknownEnumValue { value: 9, .. }
        ));
        assert_eq!(
            err.to_string(),
            "at 'paint.color': unknown value 9 for enum 'pkg.Color'"
        );
    }
}
