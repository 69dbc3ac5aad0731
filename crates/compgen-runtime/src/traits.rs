use crate::{
    CommandIndex, ComponentId, EntityId, RequestId,
    error::DecodeError,
    wire::{SchemaObject, SchemaUpdate},
};

///
/// SchemaType
///
/// Every generated type and component converts to and from a wire object.
/// Encoding after decoding reproduces an equivalent object.
///

pub trait SchemaType: Sized {
    /// Qualified schema name, for diagnostics.
    const SCHEMA_NAME: &'static str;

    fn from_schema<O: SchemaObject>(fields: &O) -> Result<Self, DecodeError>;

    fn apply_to_schema<O: SchemaObject>(&self, fields: &mut O);

    /// Encode into a fresh object.
    fn to_schema<O: SchemaObject + Default>(&self) -> O {
        let mut fields = O::default();
        self.apply_to_schema(&mut fields);

        fields
    }
}

///
/// Component
///

pub trait Component: SchemaType {
    const COMPONENT_ID: ComponentId;

    /// Merge an update into a copy of `self`. Fields present in the update
    /// replace the current value, cleared fields reset to empty, everything
    /// else is carried over.
    fn apply_update<U: SchemaUpdate>(&self, update: &U) -> Result<Self, DecodeError>;
}

///
/// CommandPayload
/// request and response types of component commands
///

pub trait CommandPayload: SchemaType + Default {
    /// Decode a payload that may be absent; absence yields the default value.
    fn from_payload<O: SchemaObject>(payload: Option<&O>) -> Result<Self, DecodeError> {
        payload.map_or_else(|| Ok(Self::default()), Self::from_schema)
    }
}

///
/// WireEnum
///

pub trait WireEnum: Copy + Sized {
    const SCHEMA_NAME: &'static str;

    fn from_wire(value: u32) -> Result<Self, DecodeError>;

    fn to_wire(self) -> u32;
}

///
/// CommandTransport
///
/// The send side of the command channel. Generated request/response
/// helpers encode the payload and hand the object to the transport.
///

pub trait CommandTransport {
    type Object: SchemaObject + Default;

    fn send_command_request(
        &mut self,
        entity_id: EntityId,
        component_id: ComponentId,
        command_index: CommandIndex,
        request: Self::Object,
    ) -> RequestId;

    fn send_command_response(
        &mut self,
        request_id: RequestId,
        component_id: ComponentId,
        command_index: CommandIndex,
        response: Self::Object,
    );
}
