use crate::node::{ComponentDefinition, EnumDefinition, TypeDefinition};
use serde::Deserialize;

///
/// SchemaBundle
///
/// The complete declaration graph as produced by the schema compiler.
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaBundle {
    #[serde(default)]
    pub schema_files: Vec<SchemaFile>,
}

///
/// SchemaFile
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaFile {
    pub canonical_path: String,
    pub package: Package,

    #[serde(default)]
    pub imports: Vec<Import>,

    #[serde(default)]
    pub types: Vec<TypeDefinition>,

    #[serde(default)]
    pub enums: Vec<EnumDefinition>,

    #[serde(default)]
    pub components: Vec<ComponentDefinition>,
}

impl SchemaFile {
    #[must_use]
    pub fn new(canonical_path: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            canonical_path: canonical_path.into(),
            package: Package {
                name: package.into(),
                source_reference: SourceReference::default(),
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, def: TypeDefinition) -> Self {
        self.types.push(def);
        self
    }

    #[must_use]
    pub fn with_enum(mut self, def: EnumDefinition) -> Self {
        self.enums.push(def);
        self
    }

    #[must_use]
    pub fn with_component(mut self, def: ComponentDefinition) -> Self {
        self.components.push(def);
        self
    }
}

///
/// Package
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Package {
    pub name: String,

    #[serde(default)]
    pub source_reference: SourceReference,
}

///
/// Import
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Import {
    pub path: String,

    #[serde(default)]
    pub source_reference: SourceReference,
}

///
/// SourceReference
/// diagnostics only
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SourceReference {
    pub line: u32,
    pub column: u32,
}

///
/// SourceFile
///
/// The owning file of a declaration, as recorded by the index.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceFile {
    pub canonical_path: String,
    pub package: String,
}
