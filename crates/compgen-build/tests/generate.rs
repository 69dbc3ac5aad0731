use compgen_build::{
    emit::emission_order,
    prelude::*,
    resolve::ResolveWarning,
    write::render,
};
use compgen_schema::{index::SchemaIndex, load::load_index};
use std::path::{Path, PathBuf};
use syn::{Item, ItemStruct};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../schema/fixtures")
        .join(name)
}

fn load(name: &str) -> SchemaIndex {
    load_index(fixture(name)).expect("fixture should load")
}

fn artifact<'a>(generation: &'a Generation, name: &str) -> &'a Artifact {
    generation
        .artifacts
        .iter()
        .find(|a| a.qualified_name == name)
        .unwrap_or_else(|| panic!("no artifact for {name}"))
}

fn parse(artifact: &Artifact) -> syn::File {
    let text = render(artifact, "test");
    syn::parse_file(&text)
        .unwrap_or_else(|err| panic!("{} does not parse: {err}", artifact.qualified_name))
}

fn find_struct<'a>(items: &'a [Item], name: &str) -> Option<&'a ItemStruct> {
    items.iter().find_map(|item| match item {
        Item::Struct(s) if s.ident == name => Some(s),
        _ => None,
    })
}

fn find_mod<'a>(items: &'a [Item], name: &str) -> Option<&'a [Item]> {
    items.iter().find_map(|item| match item {
        Item::Mod(m) if m.ident == name => m.content.as_ref().map(|(_, items)| items.as_slice()),
        _ => None,
    })
}

fn field_names(s: &ItemStruct) -> Vec<String> {
    s.fields
        .iter()
        .filter_map(|f| f.ident.as_ref().map(ToString::to_string))
        .collect()
}

#[test]
fn every_artifact_is_a_valid_rust_file() {
    for bundle in ["standard_library.json", "game.json"] {
        let generation = generate(&load(bundle), &GenerateConfig::default()).expect("generate");

        assert!(!generation.artifacts.is_empty());
        for artifact in &generation.artifacts {
            parse(artifact);
        }
    }
}

#[test]
fn one_artifact_per_top_level_declaration() {
    let generation = generate(&load("game.json"), &GenerateConfig::default()).expect("generate");

    let names: Vec<_> = generation
        .artifacts
        .iter()
        .map(|a| a.qualified_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "game.Empty",
            "game.HealRequest",
            "game.HealResponse",
            "game.LevelUp",
            "game.Loadout",
            "game.Player",
            "game.PlayerData",
            "game.SelfType",
            "game.Team",
            "game.Tree",
        ]
    );

    assert_eq!(
        artifact(&generation, "game.PlayerData").path,
        PathBuf::from("game/player_data.rs")
    );
}

#[test]
fn nested_declarations_are_inline_modules() {
    let index = load("game.json");
    let generation = generate(&index, &GenerateConfig::default()).expect("generate");
    let file = parse(artifact(&generation, "game.Tree"));

    assert!(find_struct(&file.items, "Tree").is_some());

    let node = find_mod(&file.items, "node").expect("node module");
    assert!(find_struct(node, "Node").is_some());

    let leaf = find_mod(node, "leaf").expect("leaf module");
    assert!(find_struct(leaf, "Leaf").is_some());

    assert!(find_mod(&file.items, "kind").is_some());

    let order = emission_order(&index, ["game.Tree", "game.Tree.Node", "game.Tree.Node.Leaf"]);
    assert_eq!(order, vec!["game.Tree.Node.Leaf", "game.Tree.Node", "game.Tree"]);
}

#[test]
fn self_recursive_list_is_dropped_with_one_warning() {
    let generation = generate(&load("game.json"), &GenerateConfig::default()).expect("generate");

    let recursive: Vec<_> = generation
        .warnings
        .iter()
        .filter(|w| matches!(w, ResolveWarning::RecursiveField { .. }))
        .collect();
    assert_eq!(recursive.len(), 1);
    assert_eq!(recursive[0].type_name(), "game.SelfType");
    assert_eq!(recursive[0].field(), "children");
    assert!(recursive[0].to_string().contains("game.SelfType.children"));

    let file = parse(artifact(&generation, "game.SelfType"));
    let s = find_struct(&file.items, "SelfType").expect("struct");
    assert_eq!(field_names(s), vec!["label"]);
}

#[test]
fn keep_collections_retains_recursive_lists_as_vec() {
    let config = GenerateConfig {
        recursion: RecursionPolicy::KeepCollections,
        ..GenerateConfig::default()
    };
    let generation = generate(&load("game.json"), &config).expect("generate");

    let file = parse(artifact(&generation, "game.SelfType"));
    let s = find_struct(&file.items, "SelfType").expect("struct");
    assert_eq!(field_names(s), vec!["label", "children"]);

    let tokens = artifact(&generation, "game.SelfType").tokens.to_string();
    assert!(tokens.contains(":: std :: vec :: Vec < crate :: game :: self_type :: SelfType >"));
}

#[test]
fn entity_fields_are_dropped_and_keywords_escaped() {
    let generation = generate(&load("game.json"), &GenerateConfig::default()).expect("generate");

    assert!(generation.warnings.iter().any(|w| matches!(
        w,
        ResolveWarning::EntityField { field, .. } if field == "owner"
    )));

    let file = parse(artifact(&generation, "game.Loadout"));
    let s = find_struct(&file.items, "Loadout").expect("struct");
    assert_eq!(
        field_names(s),
        vec!["ammo", "perks", "nickname", "badge", "team", "r#type", "target"]
    );
}

#[test]
fn position_has_required_coords_and_optional_visible() {
    let generation =
        generate(&load("standard_library.json"), &GenerateConfig::default()).expect("generate");
    let position = artifact(&generation, "improbable.Position");

    assert_eq!(position.path, PathBuf::from("improbable/position.rs"));

    let tokens = position.tokens.to_string();
    assert!(tokens.contains("pub visible : :: core :: option :: Option < bool >"));
    assert!(tokens.contains("const COMPONENT_ID"));
    assert!(tokens.contains("MissingField"));
    assert!(tokens.contains("pub struct PositionUpdate"));
    assert!(tokens.contains("fn update_visible"));
}

#[test]
fn restricted_components_have_no_update_surface() {
    let generation =
        generate(&load("standard_library.json"), &GenerateConfig::default()).expect("generate");
    let tokens = artifact(&generation, "improbable.restricted.Worker")
        .tokens
        .to_string();

    assert!(tokens.contains("fn apply_update"));
    assert!(tokens.contains("fn send_disconnect_request"));
    assert!(tokens.contains("pub struct CommandBinding"));

    assert!(!tokens.contains("WorkerUpdate"));
    assert!(!tokens.contains("fn update_worker_id"));
    assert!(!tokens.contains("fn send_disconnect_response"));
}

#[test]
fn components_expose_events_and_commands() {
    let generation = generate(&load("game.json"), &GenerateConfig::default()).expect("generate");
    let tokens = artifact(&generation, "game.Player").tokens.to_string();

    assert!(tokens.contains("fn levelled_up_events"));
    assert!(tokens.contains("fn add_levelled_up"));
    assert!(tokens.contains("pub enum Commands"));
    assert!(tokens.contains("Heal = 1"));
    assert!(tokens.contains("fn send_heal_request"));
    assert!(tokens.contains("fn send_heal_response"));

    // data-definition fields are flattened onto the component
    let file = parse(artifact(&generation, "game.Player"));
    let s = find_struct(&file.items, "Player").expect("struct");
    assert_eq!(field_names(s), vec!["name", "health", "loadout", "speed"]);

    let request = artifact(&generation, "game.HealRequest").tokens.to_string();
    assert!(request.contains("CommandPayload for HealRequest"));
}

#[test]
fn enums_default_to_zero_or_first_value() {
    let generation = generate(&load("game.json"), &GenerateConfig::default()).expect("generate");

    let team = artifact(&generation, "game.Team").tokens.to_string();
    assert!(team.contains("Red = 1"));
    assert!(team.contains("Self :: Red"));

    let tree = artifact(&generation, "game.Tree").tokens.to_string();
    assert!(tree.contains("Self :: Oak"));
}

#[test]
fn generate_to_dir_writes_files_and_marker() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = OutputConfig::new(dir.path().join("generated"));

    let generation = generate_to_dir(fixture("game.json"), &GenerateConfig::default(), &output)
        .expect("generate to dir");

    assert!(output.marker.exists());
    for artifact in &generation.artifacts {
        assert!(output.out_dir.join(&artifact.path).exists());
    }

    let root = std::fs::read_to_string(output.out_dir.join("mod.rs")).expect("root mod");
    assert!(root.contains("pub mod game;"));

    let game = std::fs::read_to_string(output.out_dir.join("game/mod.rs")).expect("game mod");
    assert!(game.contains("pub mod player;"));
    assert!(game.contains("pub mod self_type;"));
}
