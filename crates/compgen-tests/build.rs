//! Runs the generator over every fixture bundle into `OUT_DIR`, then folds
//! each bundle's file tree into a single module file the crate includes.

use compgen_build::{
    codec::naming,
    config::{GenerateConfig, OutputConfig, RecursionPolicy},
    write::generate_to_dir,
};
use std::{
    collections::BTreeMap,
    env::var,
    error::Error,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

// (fixture stem, recursion policy)
const BUNDLES: &[(&str, RecursionPolicy)] = &[
    ("standard_library", RecursionPolicy::Strict),
    ("game", RecursionPolicy::Strict),
    ("shapes", RecursionPolicy::KeepCollections),
];

///
/// ModuleTree
/// written files keyed by their module path
///

#[derive(Default)]
struct ModuleTree {
    children: BTreeMap<String, Self>,
    file: Option<PathBuf>,
}

impl ModuleTree {
    fn insert(&mut self, relative: &Path, file: PathBuf) {
        let mut node = self;
        for component in relative.with_extension("").iter() {
            node = node
                .children
                .entry(component.to_string_lossy().into_owned())
                .or_default();
        }

        node.file = Some(file);
    }

    // render
    // generated files open with inner attributes, so they are inlined as
    // module bodies rather than pulled in with `include!`
    fn render(&self, out: &mut String) -> Result<(), Box<dyn Error>> {
        for (name, child) in &self.children {
            let ident = naming::ident(name)?;
            writeln!(out, "pub mod {ident} {{")?;

            if let Some(file) = &child.file {
                out.push_str(&fs::read_to_string(file)?);
            }
            child.render(out)?;

            writeln!(out, "}}")?;
        }

        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(var("OUT_DIR")?);
    let fixtures = PathBuf::from(var("CARGO_MANIFEST_DIR")?).join("../../schema/fixtures");

    println!("cargo:rerun-if-changed=build.rs");

    for (bundle, recursion) in BUNDLES {
        let fixture = fixtures.join(format!("{bundle}.json"));
        println!("cargo:rerun-if-changed={}", fixture.display());

        let config = GenerateConfig {
            recursion: *recursion,
            ..GenerateConfig::default()
        };
        let output = OutputConfig::new(out_dir.join(bundle));
        let generation = generate_to_dir(&fixture, &config, &output)?;

        let mut tree = ModuleTree::default();
        for artifact in &generation.artifacts {
            tree.insert(&artifact.path, output.out_dir.join(&artifact.path));
        }

        let mut text = String::new();
        tree.render(&mut text)?;
        fs::write(out_dir.join(format!("{bundle}.rs")), text)?;
    }

    Ok(())
}
