//! Schema-to-Rust codec generator.
//!
//! `generate` resolves every declaration of a `SchemaIndex`, classifies
//! the retained fields and emits one token artifact per top-level type or
//! enum. `write::generate_to_dir` runs the same pipeline against disk.

pub mod classify;
pub mod codec;
pub mod config;
pub mod emit;
pub mod resolve;
pub mod write;

use crate::{
    config::GenerateConfig,
    emit::{Artifact, EmitError},
    resolve::{ResolveError, ResolveWarning, Resolver},
    write::WriteError,
};
use compgen_schema::index::SchemaIndex;
use std::time::Instant;
use thiserror::Error as ThisError;
use tracing::{info, warn};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, Generation,
        config::{GenerateConfig, OutputConfig, RecursionPolicy},
        emit::Artifact,
        generate,
        resolve::ResolveWarning,
        write::generate_to_dir,
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    SchemaError(#[from] compgen_schema::Error),

    #[error(transparent)]
    ResolveError(#[from] ResolveError),

    #[error(transparent)]
    EmitError(#[from] EmitError),

    #[error(transparent)]
    WriteError(#[from] WriteError),
}

///
/// Generation
/// artifacts of one run plus every warning the resolver reported
///

#[derive(Clone, Debug)]
pub struct Generation {
    pub artifacts: Vec<Artifact>,
    pub warnings: Vec<ResolveWarning>,
}

// generate
/// Resolve, classify and emit every declaration in the index. Warnings are
/// logged once and returned; any error aborts the whole run.
pub fn generate(index: &SchemaIndex, config: &GenerateConfig) -> Result<Generation, Error> {
    let started = Instant::now();

    let mut resolver = Resolver::new(index, config);
    let types = resolver.resolve_all()?;
    let enums = resolver.resolve_enums()?;

    let warnings = resolver.warnings();
    for warning in &warnings {
        warn!(
            type_name = warning.type_name(),
            field = warning.field(),
            "{warning}"
        );
    }

    let artifacts = emit::emit(index, config, &types, &enums)?;

    info!(
        types = types.len(),
        enums = enums.len(),
        artifacts = artifacts.len(),
        warnings = warnings.len(),
        elapsed = ?started.elapsed(),
        "generation complete"
    );

    Ok(Generation {
        artifacts,
        warnings,
    })
}
