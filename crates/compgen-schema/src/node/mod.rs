mod annotation;
mod component;
mod r#enum;
mod field;
mod file;
mod type_def;

pub use annotation::*;
pub use component::*;
pub use field::*;
pub use file::*;
pub use r#enum::*;
pub use type_def::*;

use serde::{Deserialize, Deserializer};

///
/// DeclKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeclKind {
    Component,
    Enum,
    Type,
}

// empty_as_none
// the schema compiler writes "" for an absent outer type / data definition
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value.filter(|s| !s.is_empty()))
}

/// Final dotted segment of a qualified name.
#[must_use]
pub fn short_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, name)| name)
}
