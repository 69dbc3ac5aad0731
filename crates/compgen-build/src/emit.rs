//! Emission driver: orders declarations by nesting depth and folds nested
//! members into their outer type, yielding one artifact per top-level
//! type or enum.

use crate::{
    codec::{TypeCodec, emit_enum, emit_type, naming},
    config::GenerateConfig,
    resolve::{ResolvedEnum, ResolvedType},
};
use compgen_schema::{index::SchemaIndex, node::short_name};
use proc_macro2::TokenStream;
use quote::quote;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
    sync::Arc,
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// EmitError
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("'{0}' is not a valid Rust identifier")]
    InvalidIdentifier(String),

    #[error("'{path}' is not a valid Rust path")]
    InvalidPath {
        path: String,
        #[source]
        source: syn::Error,
    },

    #[error("unknown declaration '{0}'")]
    UnknownDeclaration(String),

    #[error("nested declaration '{0}' has no assembled outer type")]
    MissingNested(String),

    #[error("enum '{0}' declares no values")]
    EmptyEnum(String),
}

///
/// Artifact
///
/// One output file: a top-level type or enum with every nested member
/// inlined as a module.
///

#[derive(Clone, Debug)]
pub struct Artifact {
    pub qualified_name: String,

    /// Relative to the output directory.
    pub path: PathBuf,

    pub tokens: TokenStream,
}

/// Nesting depth of a declaration: the length of its outer-type chain.
/// Bounded by the index size, so a malformed chain still terminates.
#[must_use]
pub fn nesting_depth(index: &SchemaIndex, name: &str) -> usize {
    let mut depth = 0;
    let mut current = name;

    while let Some(outer) = index.outer_of(current) {
        depth += 1;
        if depth > index.len() {
            break;
        }
        current = outer;
    }

    depth
}

/// Deepest declarations first, ties broken by qualified name.
#[must_use]
pub fn emission_order<'a>(
    index: &SchemaIndex,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut order: Vec<(usize, &str)> = names
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|name| (nesting_depth(index, name), name))
        .collect();

    order.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    order.into_iter().map(|(_, name)| name).collect()
}

// emit
// assemble every resolved type and enum into top-level artifacts
pub fn emit(
    index: &SchemaIndex,
    config: &GenerateConfig,
    types: &[Arc<ResolvedType>],
    enums: &[ResolvedEnum],
) -> Result<Vec<Artifact>, EmitError> {
    let paths = naming::Paths::new(index, config)?;

    let types: BTreeMap<&str, &Arc<ResolvedType>> = types
        .iter()
        .map(|t| (t.qualified_name.as_str(), t))
        .collect();
    let enums: BTreeMap<&str, &ResolvedEnum> = enums
        .iter()
        .map(|e| (e.qualified_name.as_str(), e))
        .collect();

    // content of nested declarations, waiting for their outer type
    let mut assembled: BTreeMap<String, TokenStream> = BTreeMap::new();
    let mut artifacts = Vec::new();

    for name in emission_order(index, types.keys().chain(enums.keys()).copied()) {
        let mut content = if let Some(ty) = types.get(name) {
            emit_type(&TypeCodec::new(Arc::clone(ty)), &paths)?
        } else if let Some(en) = enums.get(name) {
            emit_enum(en, &paths)?
        } else {
            return Err(EmitError::UnknownDeclaration(name.to_string()));
        };

        let nested: BTreeSet<&String> = index
            .nested_types(name)
            .iter()
            .chain(index.nested_enums(name))
            .collect();
        for member in nested {
            let inner = assembled
                .remove(member.as_str())
                .ok_or_else(|| EmitError::MissingNested(member.clone()))?;
            let module = naming::module_ident(short_name(member))?;

            content.extend(quote! {
                pub mod #module {
                    #inner
                }
            });
        }

        if index.outer_of(name).is_some() {
            assembled.insert(name.to_string(), content);
            continue;
        }

        let path = paths.file_path(name)?;
        debug!(declaration = name, path = %path.display(), "assembled artifact");

        artifacts.push(Artifact {
            qualified_name: name.to_string(),
            path,
            tokens: quote! {
                #![allow(clippy::all, clippy::pedantic, clippy::nursery)]

                #content
            },
        });
    }

    // a nested member whose outer declaration was never emitted
    if let Some(orphan) = assembled.into_keys().next() {
        return Err(EmitError::MissingNested(orphan));
    }

    artifacts.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));

    Ok(artifacts)
}

///
/// TESTS
///
