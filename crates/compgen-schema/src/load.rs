use crate::{index::SchemaIndex, node::SchemaBundle};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// LoadError
///

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("failed to read schema bundle '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize schema bundle '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a bundle from the schema compiler's JSON output. Unknown members
/// are rejected rather than ignored.
pub fn parse_bundle(json: &str) -> Result<SchemaBundle, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and parse a bundle file.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<SchemaBundle, LoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: display.clone(),
        source,
    })?;

    parse_bundle(&text).map_err(|source| LoadError::Parse {
        path: display,
        source,
    })
}

/// Read, parse and index a bundle file.
pub fn load_index(path: impl AsRef<Path>) -> Result<SchemaIndex, crate::Error> {
    let bundle = load_bundle(path)?;

    Ok(SchemaIndex::new(bundle)?)
}

///
/// TESTS
///
