use derive_more::Display;

///
/// ResolveWarning
///
/// A field dropped from a resolved type. Resolution continues.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum ResolveWarning {
    #[display("field '{type_name}.{field}' is the Entity type, which is currently unsupported.")]
    EntityField { type_name: String, field: String },

    #[display("field '{type_name}.{field}' is recursive and was omitted.")]
    RecursiveField { type_name: String, field: String },
}

impl ResolveWarning {
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::EntityField { type_name, .. } | Self::RecursiveField { type_name, .. } => {
                type_name
            }
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::EntityField { field, .. } | Self::RecursiveField { field, .. } => field,
        }
    }
}
