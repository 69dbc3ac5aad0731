//! Runtime surface targeted by generated component codecs: the wire
//! container traits, decode errors, persistent collections and the
//! structural equality/hash traits.

pub mod collection;
pub mod eq;
pub mod error;
pub mod memory;
pub mod traits;
pub mod wire;

pub use collection::{List, Map, MapBuf};
pub use eq::{SchemaEq, SchemaHash};
pub use error::DecodeError;
pub use traits::{CommandPayload, CommandTransport, Component, SchemaType, WireEnum};
pub use wire::{SchemaObject, SchemaUpdate};

use derive_more::{Display, From};

/// Wire addressing key of a field within an object.
pub type FieldId = u32;

/// Numeric id of a component.
pub type ComponentId = u32;

/// Index of a command within its component.
pub type CommandIndex = u32;

/// Sub-field id holding the key of a map entry pair object.
pub const MAP_KEY_FIELD_ID: FieldId = 1;

/// Sub-field id holding the value of a map entry pair object.
pub const MAP_VALUE_FIELD_ID: FieldId = 2;

///
/// EntityId
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
)]
#[display("{_0}")]
pub struct EntityId(pub i64);

///
/// RequestId
/// correlates a command response with its request
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, From, Hash, PartialEq)]
#[display("{_0}")]
pub struct RequestId(pub u64);

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        CommandIndex, ComponentId, EntityId, FieldId, MAP_KEY_FIELD_ID, MAP_VALUE_FIELD_ID,
        RequestId,
        collection::{List, Map, MapBuf},
        eq::{SchemaEq, SchemaHash},
        error::DecodeError,
        traits::{CommandPayload, CommandTransport, Component, SchemaType, WireEnum},
        wire::{SchemaObject, SchemaUpdate},
    };
}
