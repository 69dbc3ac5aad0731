use crate::node::{Annotation, FieldDefinition, SourceReference, empty_as_none, short_name};
use serde::Deserialize;

///
/// ComponentDefinition
///
/// A type with a component id, commands and events. Its fields are either
/// declared inline or borrowed from a separate data-definition type.
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentDefinition {
    pub name: String,
    pub qualified_name: String,
    pub component_id: u32,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub data_definition: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    #[serde(default)]
    pub commands: Vec<CommandDefinition>,

    #[serde(default)]
    pub events: Vec<EventDefinition>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub source_reference: SourceReference,
}

impl ComponentDefinition {
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, component_id: u32) -> Self {
        let qualified_name = qualified_name.into();

        Self {
            name: short_name(&qualified_name).to_string(),
            qualified_name,
            component_id,
            data_definition: None,
            fields: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
            annotations: Vec::new(),
            source_reference: SourceReference::default(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_data_definition(mut self, type_name: impl Into<String>) -> Self {
        self.data_definition = Some(type_name.into());
        self
    }

    #[must_use]
    pub fn with_command(
        mut self,
        name: impl Into<String>,
        command_index: u32,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
    ) -> Self {
        self.commands.push(CommandDefinition {
            name: name.into(),
            command_index,
            request_type: request_type.into(),
            response_type: response_type.into(),
            annotations: Vec::new(),
            source_reference: SourceReference::default(),
        });
        self
    }

    #[must_use]
    pub fn with_event(
        mut self,
        name: impl Into<String>,
        event_index: u32,
        payload_type: impl Into<String>,
    ) -> Self {
        self.events.push(EventDefinition {
            name: name.into(),
            event_index,
            payload_type: payload_type.into(),
            annotations: Vec::new(),
            source_reference: SourceReference::default(),
        });
        self
    }
}

///
/// CommandDefinition
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommandDefinition {
    pub name: String,
    pub command_index: u32,
    pub request_type: String,
    pub response_type: String,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub source_reference: SourceReference,
}

///
/// EventDefinition
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventDefinition {
    pub name: String,
    pub event_index: u32,

    #[serde(rename = "type")]
    pub payload_type: String,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub source_reference: SourceReference,
}
