use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::{
    error::GenerateError,
    ir::{ApiSpec, Dependency},
    parse::Document,
    tests::assert_matches,
};

#[test]
fn test_resolution_order_puts_dependencies_first() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Animals
        schemas:
          Dog:
            type: object
            parent:
              $ref: Pet
          Pets:
            type: array
            items:
              $ref: Pet
          Pet:
            type: object
            parent:
              $ref: Animal
          Animal:
            type: object
            discriminator: kind
    "})
    .unwrap();
    let spec = ApiSpec::from_doc(&doc).unwrap();

    let order = spec.graph().resolution_order();
    let position = |name: &str| {
        let id = spec.lookup(name).unwrap();
        order.iter().position(|&other| other == id).unwrap()
    };

    assert_eq!(order.len(), 4);
    assert!(position("Animal") < position("Pet"));
    assert!(position("Pet") < position("Dog"));
    assert!(position("Pet") < position("Pets"));
}

#[test]
fn test_dependencies_and_dependents() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Lookups
        schemas:
          Lookup:
            type: dictionary
            values:
              $ref: Entry
          Entry:
            type: primitive
            format: int64
    "})
    .unwrap();
    let spec = ApiSpec::from_doc(&doc).unwrap();
    let lookup = spec.lookup("Lookup").unwrap();
    let entry = spec.lookup("Entry").unwrap();

    assert_eq!(
        spec.graph().dependencies(lookup).collect::<Vec<_>>(),
        vec![(entry, Dependency::Values)]
    );
    assert_eq!(
        spec.graph().dependents(entry).collect::<Vec<_>>(),
        vec![(lookup, Dependency::Values)]
    );
}

#[test]
fn test_self_referencing_array_is_cyclic() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Trees
        schemas:
          Forest:
            type: array
            items:
              $ref: Forest
    "})
    .unwrap();

    let result = ApiSpec::from_doc(&doc);

    assert_matches!(
        result,
        Err(GenerateError::CyclicTypeReference { path }) if path == "schemas.Forest",
    );
}

#[test]
fn test_cyclic_parents() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Chickens
        schemas:
          Chicken:
            type: object
            parent:
              $ref: Egg
          Egg:
            type: object
            parent:
              $ref: Chicken
    "})
    .unwrap();

    let result = ApiSpec::from_doc(&doc);

    assert_matches!(result, Err(GenerateError::CyclicTypeReference { .. }));
}

#[test]
fn test_properties_can_refer_to_their_own_object() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Trees
        schemas:
          Node:
            type: object
            properties:
              - name: children
                schema:
                  type: array
                  items:
                    $ref: Node
              - name: parent
                schema:
                  $ref: Node
    "})
    .unwrap();

    let spec = ApiSpec::from_doc(&doc).unwrap();

    // `Node`, and the inline array of `Node`s.
    assert_eq!(spec.graph().resolution_order().len(), 2);
}

#[test]
fn test_ancestors() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Animals
        schemas:
          Animal:
            type: object
          Pet:
            type: object
            parent:
              $ref: Animal
          Dog:
            type: object
            parent:
              $ref: Pet
    "})
    .unwrap();
    let spec = ApiSpec::from_doc(&doc).unwrap();

    let names = spec
        .ancestors(spec.lookup("Dog").unwrap())
        .map(|id| spec.schema(id).name.unwrap())
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["Dog", "Pet", "Animal"]);
}
