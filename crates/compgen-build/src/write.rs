//! Output writer: renders artifacts to files, declares every generated
//! module, and brackets the run with the success marker.

use crate::{
    Error, Generation,
    codec::naming,
    config::{GenerateConfig, OutputConfig},
    emit::Artifact,
    generate,
};
use compgen_schema::load::load_index;
use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// WriteError
///

#[derive(Debug, ThisError)]
pub enum WriteError {
    #[error("failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("two artifacts map to '{0}'")]
    DuplicatePath(PathBuf),

    #[error("module '{0}' is both a generated file and a directory")]
    ModuleConflict(PathBuf),
}

impl WriteError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Render an artifact as file text.
#[must_use]
pub fn render(artifact: &Artifact, header: &str) -> String {
    format!("// {header}\n\n{}\n", artifact.tokens)
}

/// Write every artifact under `out_dir`, plus a `mod.rs` per directory
/// declaring its files and subdirectories. Returns the written paths.
pub fn write_artifacts(
    artifacts: &[Artifact],
    out_dir: &Path,
    header: &str,
) -> Result<Vec<PathBuf>, WriteError> {
    let modules = module_tree(artifacts)?;
    let mut written = Vec::new();

    for artifact in artifacts {
        let path = out_dir.join(&artifact.path);
        write_file(&path, &render(artifact, header))?;
        debug!(declaration = %artifact.qualified_name, path = %path.display(), "wrote artifact");

        written.push(path);
    }

    for (dir, children) in &modules {
        let body: String = children
            .iter()
            .map(|child| format!("pub mod {child};\n"))
            .collect();

        let path = out_dir.join(dir).join("mod.rs");
        write_file(&path, &format!("// {header}\n\n{body}"))?;
        written.push(path);
    }

    Ok(written)
}

/// Full run against disk: delete the marker, load, generate, write, then
/// write the marker. Any failure leaves the marker absent.
pub fn generate_to_dir(
    bundle_path: impl AsRef<Path>,
    config: &GenerateConfig,
    output: &OutputConfig,
) -> Result<Generation, Error> {
    match fs::remove_file(&output.marker) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(WriteError::io(&output.marker, err).into()),
    }

    let index = load_index(bundle_path)?;
    let generation = generate(&index, config)?;
    let written = write_artifacts(&generation.artifacts, &output.out_dir, &config.header)?;

    write_file(&output.marker, "")?;
    info!(
        files = written.len(),
        out_dir = %output.out_dir.display(),
        "output written"
    );

    Ok(generation)
}

// module_tree
// directory (relative) -> module names declared in its mod.rs
fn module_tree(artifacts: &[Artifact]) -> Result<BTreeMap<PathBuf, BTreeSet<String>>, WriteError> {
    let mut files = BTreeSet::new();
    let mut tree: BTreeMap<PathBuf, BTreeSet<String>> = BTreeMap::new();

    for artifact in artifacts {
        if !files.insert(artifact.path.clone()) {
            return Err(WriteError::DuplicatePath(artifact.path.clone()));
        }

        let mut dir = PathBuf::new();
        for component in artifact.path.iter() {
            let name = Path::new(component);
            let module = name
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            tree.entry(dir.clone()).or_default().insert(module);
            dir.push(name);
        }
    }

    // a module stem may not name a file and a directory at once
    for file in &files {
        let as_dir = file.with_extension("");
        if tree.contains_key(&as_dir) {
            return Err(WriteError::ModuleConflict(as_dir));
        }
    }

    // keyword stems (`type.rs`) are declared as raw identifiers
    for children in tree.values_mut() {
        *children = children
            .iter()
            .map(|child| {
                naming::ident(child).map_or_else(|_| child.clone(), |ident| ident.to_string())
            })
            .collect();
    }

    Ok(tree)
}

fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| WriteError::io(parent, err))?;
    }

    fs::write(path, contents).map_err(|err| WriteError::io(path, err))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn artifact(name: &str, path: &str) -> Artifact {
        Artifact {
            qualified_name: name.to_string(),
            path: PathBuf::from(path),
            tokens: quote!(pub struct Marker;),
        }
    }

    #[test]
    fn files_and_mod_declarations_are_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifacts = [
            artifact("game.world.Tree", "game/world/tree.rs"),
            artifact("game.Rock", "game/rock.rs"),
        ];

        write_artifacts(&artifacts, dir.path(), "generated").expect("write");

        let tree = fs::read_to_string(dir.path().join("game/world/tree.rs")).expect("tree");
        assert!(tree.starts_with("// generated\n\n"));
        assert!(tree.contains("pub struct Marker"));

        let root = fs::read_to_string(dir.path().join("mod.rs")).expect("root mod");
        assert!(root.contains("pub mod game;"));

        let game = fs::read_to_string(dir.path().join("game/mod.rs")).expect("game mod");
        assert!(game.contains("pub mod rock;"));
        assert!(game.contains("pub mod world;"));

        let world = fs::read_to_string(dir.path().join("game/world/mod.rs")).expect("world mod");
        assert!(world.contains("pub mod tree;"));
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifacts = [artifact("a.Foo", "a/foo.rs"), artifact("a.foo", "a/foo.rs")];

        let err = write_artifacts(&artifacts, dir.path(), "generated").expect_err("duplicate");
        assert!(matches!(err, WriteError::DuplicatePath(_)));
    }

    #[test]
    fn file_and_directory_conflict_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifacts = [artifact("a.B", "a/b.rs"), artifact("a.b.C", "a/b/c.rs")];

        let err = write_artifacts(&artifacts, dir.path(), "generated").expect_err("conflict");
        assert!(matches!(err, WriteError::ModuleConflict(_)));
    }

    #[test]
    fn failed_run_leaves_no_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = OutputConfig::new(dir.path().join("out"));
        fs::create_dir_all(&output.out_dir).expect("out dir");
        fs::write(&output.marker, "").expect("stale marker");

        let result = generate_to_dir(
            dir.path().join("missing.json"),
            &GenerateConfig::default(),
            &output,
        );

        assert!(result.is_err());
        assert!(!output.marker.exists());
    }
}
