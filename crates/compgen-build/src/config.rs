use compgen_schema::RESTRICTED_PREFIX;
use serde::Deserialize;
use std::path::PathBuf;

///
/// RecursionPolicy
///
/// What to do with a field whose value kind reaches back to its declaring
/// type. Singular and option recursion is always dropped.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RecursionPolicy {
    /// Drop every recursive field, whatever its shape.
    #[default]
    Strict,

    /// Keep list and map recursion, materialized as growable collections.
    KeepCollections,
}

///
/// GenerateConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Qualified-name prefix of reserved system types.
    pub restricted_prefix: String,

    pub recursion: RecursionPolicy,

    /// Path of the runtime crate as seen from generated code.
    pub runtime_path: String,

    /// Module path the output directory is mounted at.
    pub root_path: String,

    /// First-line comment of every written file.
    pub header: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            restricted_prefix: RESTRICTED_PREFIX.to_string(),
            recursion: RecursionPolicy::default(),
            runtime_path: "::compgen_runtime".to_string(),
            root_path: "crate".to_string(),
            header: "Generated by compgen. Do not edit.".to_string(),
        }
    }
}

impl GenerateConfig {
    #[must_use]
    pub fn is_restricted(&self, qualified_name: &str) -> bool {
        qualified_name.starts_with(&self.restricted_prefix)
    }
}

///
/// OutputConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub out_dir: PathBuf,

    /// Written only after every artifact is on disk.
    pub marker: PathBuf,
}

impl OutputConfig {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        let out_dir = out_dir.into();
        let marker = out_dir.join(".compgen-complete");

        Self { out_dir, marker }
    }
}

///
/// TESTS
///
