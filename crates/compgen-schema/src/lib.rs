//! Declaration graph for component schemas: the parsed, not-yet-resolved
//! types, enums and components, plus the lookup index built over them.

pub mod index;
pub mod load;
pub mod node;
pub mod types;

use crate::{index::IndexError, load::LoadError};
use thiserror::Error as ThisError;

/// Prefix shared by every reserved system type.
pub const RESTRICTED_PREFIX: &str = "improbable.restricted";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        index::SchemaIndex,
        node::*,
        types::{FieldId, Primitive, ScalarKind},
    };
    pub use serde::Deserialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    IndexError(#[from] IndexError),

    #[error(transparent)]
    LoadError(#[from] LoadError),
}
