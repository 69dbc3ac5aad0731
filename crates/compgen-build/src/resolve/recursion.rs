use compgen_schema::{index::SchemaIndex, node::FieldShape};
use std::collections::BTreeSet;

// reaches
// true if following named-type references from `shape` (any shape, any
// depth) arrives back at `target`; walks declarations, not resolved types
pub(super) fn reaches(index: &SchemaIndex, shape: &FieldShape, target: &str) -> bool {
    let mut stack: Vec<&str> = shape.references().filter_map(|r| r.named_type()).collect();
    let mut visited = BTreeSet::new();

    while let Some(name) = stack.pop() {
        if name == target {
            return true;
        }
        if !visited.insert(name) {
            continue;
        }

        // unknown names are reported when their referrer is resolved
        if let Some(def) = index.get_type(name) {
            stack.extend(
                def.fields
                    .iter()
                    .flat_map(|f| f.references())
                    .filter_map(|r| r.named_type()),
            );
        }
    }

    false
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use compgen_schema::{
        node::{FieldDefinition, SchemaBundle, SchemaFile, TypeDefinition, TypeReference},
        types::Primitive,
    };

    fn index(file: SchemaFile) -> SchemaIndex {
        SchemaIndex::new(SchemaBundle {
            schema_files: vec![file],
        })
        .expect("index")
    }

    #[test]
    fn direct_self_reference_through_a_map_value() {
        let idx = index(SchemaFile::new("t.schema", "t").with_type(TypeDefinition::new("t.Node")));
        let shape = FieldShape::Map {
            key: Primitive::String.into(),
            value: TypeReference::named("t.Node"),
        };

        assert!(reaches(&idx, &shape, "t.Node"));
    }

    #[test]
    fn transitive_reference_through_an_intermediate_type() {
        let idx = index(
            SchemaFile::new("t.schema", "t")
                .with_type(
                    TypeDefinition::new("t.A")
                        .with_field(FieldDefinition::list("b", 1, TypeReference::named("t.B"))),
                )
                .with_type(
                    TypeDefinition::new("t.B")
                        .with_field(FieldDefinition::option("a", 1, TypeReference::named("t.A"))),
                ),
        );

        let shape = FieldShape::Singular(TypeReference::named("t.B"));
        assert!(reaches(&idx, &shape, "t.A"));
    }

    #[test]
    fn unrelated_cycles_terminate() {
        let idx = index(
            SchemaFile::new("t.schema", "t")
                .with_type(TypeDefinition::new("t.Target"))
                .with_type(
                    TypeDefinition::new("t.Loop")
                        .with_field(FieldDefinition::list("me", 1, TypeReference::named("t.Loop"))),
                ),
        );

        let shape = FieldShape::Singular(TypeReference::named("t.Loop"));
        assert!(!reaches(&idx, &shape, "t.Target"));
    }
}
