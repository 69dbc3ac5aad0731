//! Identifier and path rules for generated code.

use crate::{config::GenerateConfig, emit::EmitError};
use compgen_schema::{index::SchemaIndex, node::short_name};
use convert_case::{Boundary, Case, Casing};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::path::PathBuf;

/// Strict and reserved keywords of the 2024 edition.
pub const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

// keywords that cannot be raw identifiers; these take a `_` suffix instead
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

#[must_use]
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

#[must_use]
pub fn is_valid_ident(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
}

/// Apply the non-raw suffix rule; raw escaping happens in `ident`.
#[must_use]
pub fn escape_non_raw(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// A keyword-safe identifier.
pub fn ident(name: &str) -> Result<Ident, EmitError> {
    let name = escape_non_raw(name);
    if !is_valid_ident(&name) {
        return Err(EmitError::InvalidIdentifier(name));
    }

    Ok(if is_keyword(&name) {
        Ident::new_raw(&name, Span::call_site())
    } else {
        Ident::new(&name, Span::call_site())
    })
}

// convert
// digits stay attached to their word: `int32_value`, `Vector3`
fn convert(name: &str, case: Case) -> String {
    name.remove_boundaries(&Boundary::digits()).to_case(case)
}

#[must_use]
pub fn snake(name: &str) -> String {
    convert(name, Case::Snake)
}

/// Module / file stem for a package segment or declaration name.
#[must_use]
pub fn module_name(name: &str) -> String {
    escape_non_raw(&snake(name))
}

pub fn module_ident(name: &str) -> Result<Ident, EmitError> {
    ident(&module_name(name))
}

pub fn field_ident(name: &str) -> Result<Ident, EmitError> {
    ident(&snake(name))
}

pub fn type_ident(name: &str) -> Result<Ident, EmitError> {
    ident(name)
}

pub fn variant_ident(name: &str) -> Result<Ident, EmitError> {
    ident(&convert(name, Case::Pascal))
}

/// `<FIELD>_FIELD_ID`
pub fn field_id_const(name: &str) -> Result<Ident, EmitError> {
    ident(&format!("{}_FIELD_ID", snake(name).to_uppercase()))
}

/// Prefix an identifier, e.g. `update_` + field.
pub fn prefixed(prefix: &str, name: &str) -> Result<Ident, EmitError> {
    ident(&format!("{prefix}{}", snake(name)))
}

/// Suffix an identifier, e.g. field + `_events`.
pub fn suffixed(name: &str, suffix: &str) -> Result<Ident, EmitError> {
    ident(&format!("{}{suffix}", snake(name)))
}

///
/// Paths
///
/// Maps qualified names to Rust paths and output files. A declaration
/// `pkg.sub.Outer.Inner` lives at `<root>::pkg::sub::outer::inner::Inner`
/// inside the file `pkg/sub/outer.rs`.
///

pub struct Paths<'a> {
    index: &'a SchemaIndex,
    root: syn::Path,
    runtime: syn::Path,
}

impl<'a> Paths<'a> {
    pub fn new(index: &'a SchemaIndex, config: &GenerateConfig) -> Result<Self, EmitError> {
        Ok(Self {
            index,
            root: parse_path(&config.root_path)?,
            runtime: parse_path(&config.runtime_path)?,
        })
    }

    #[must_use]
    pub const fn runtime(&self) -> &syn::Path {
        &self.runtime
    }

    // split
    // (package segments, declaration segments)
    fn split(&self, qualified_name: &str) -> Result<(Vec<String>, Vec<String>), EmitError> {
        let file = self
            .index
            .file_of(qualified_name)
            .ok_or_else(|| EmitError::UnknownDeclaration(qualified_name.to_string()))?;

        let package = file.package.as_str();
        if package.is_empty() {
            return Ok((Vec::new(), segments(qualified_name)));
        }

        let decl = qualified_name
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or_else(|| short_name(qualified_name));

        Ok((segments(package), segments(decl)))
    }

    /// Full Rust path of a generated type or enum.
    pub fn type_path(&self, qualified_name: &str) -> Result<TokenStream, EmitError> {
        let (package, decl) = self.split(qualified_name)?;
        let root = &self.root;

        let modules = package
            .iter()
            .chain(&decl)
            .map(|seg| module_ident(seg))
            .collect::<Result<Vec<_>, _>>()?;
        let name = type_ident(decl.last().map_or(qualified_name, String::as_str))?;

        Ok(quote!(#root #(:: #modules)* :: #name))
    }

    /// Output file of a top-level declaration, relative to the output dir.
    pub fn file_path(&self, qualified_name: &str) -> Result<PathBuf, EmitError> {
        let (package, decl) = self.split(qualified_name)?;

        let mut path: PathBuf = package.iter().map(|seg| module_name(seg)).collect();
        let top = decl.first().map_or(qualified_name, String::as_str);
        path.push(format!("{}.rs", module_name(top)));

        Ok(path)
    }
}

// segments
fn segments(dotted: &str) -> Vec<String> {
    dotted.split('.').map(str::to_string).collect()
}

// parse_path
fn parse_path(path: &str) -> Result<syn::Path, EmitError> {
    syn::parse_str(path).map_err(|source| EmitError::InvalidPath {
        path: path.to_string(),
        source,
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use compgen_schema::node::{SchemaBundle, SchemaFile, TypeDefinition};

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(ident("type").expect("ident").to_string(), "r#type");
        assert_eq!(ident("self").expect("ident").to_string(), "self_");
        assert_eq!(ident("Self").expect("ident").to_string(), "Self_");
        assert_eq!(ident("speed").expect("ident").to_string(), "speed");
    }

    #[test]
    fn invalid_identifiers_are_errors() {
        assert!(matches!(
            ident("has-dash"),
            Err(EmitError::InvalidIdentifier(_))
        ));
        assert!(ident("9lives").is_err());
    }

    #[test]
    fn field_consts_are_upper_snake() {
        assert_eq!(
            field_id_const("maxSpeed").expect("const").to_string(),
            "MAX_SPEED_FIELD_ID"
        );
    }

    #[test]
    fn digits_do_not_split_words() {
        assert_eq!(snake("sint32_value"), "sint32_value");
        assert_eq!(module_name("Vector3"), "vector3");
        assert_eq!(
            variant_ident("LEVEL_2").expect("variant").to_string(),
            "Level2"
        );
    }

    #[test]
    fn nested_paths_use_one_module_per_segment() {
        let index = SchemaIndex::new(SchemaBundle {
            schema_files: vec![
                SchemaFile::new("game/world.schema", "game.world")
                    .with_type(TypeDefinition::new("game.world.Outer"))
                    .with_type(
                        TypeDefinition::new("game.world.Outer.Inner").nested_in("game.world.Outer"),
                    ),
            ],
        })
        .expect("index");
        let paths = Paths::new(&index, &GenerateConfig::default()).expect("paths");

        let path = paths.type_path("game.world.Outer.Inner").expect("path");
        assert_eq!(
            path.to_string().replace(' ', ""),
            "crate::game::world::outer::inner::Inner"
        );

        assert_eq!(
            paths.file_path("game.world.Outer.Inner").expect("file"),
            PathBuf::from("game/world/outer.rs")
        );
    }

    #[test]
    fn bad_root_path_is_rejected() {
        let index = SchemaIndex::default();
        let config = GenerateConfig {
            root_path: "not a path".to_string(),
            ..GenerateConfig::default()
        };

        assert!(matches!(
            Paths::new(&index, &config),
            Err(EmitError::InvalidPath { .. })
        ));
    }
}
