use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::{
    error::GenerateError,
    ir::{ApiSpec, RawSchemaKind, SchemaId},
    parse::Document,
    tests::{WIDGETS, assert_matches},
};

#[test]
fn test_named_schemas_come_first() {
    let doc = Document::from_yaml(WIDGETS).unwrap();
    let spec = ApiSpec::from_doc(&doc).unwrap();

    let color = spec.lookup("Color").unwrap();
    let widget = spec.lookup("Widget").unwrap();
    assert_eq!(color.index(), 0);
    assert_eq!(widget.index(), 1);
    assert_eq!(spec.schema(widget).name, Some("Widget"));
    assert_eq!(spec.schema(widget).path, "schemas.Widget");
}

#[test]
fn test_inline_schemas_get_their_own_ids() {
    let doc = Document::from_yaml(WIDGETS).unwrap();
    let spec = ApiSpec::from_doc(&doc).unwrap();

    let widget = spec.schema(spec.lookup("Widget").unwrap());
    let RawSchemaKind::Object(object) = &widget.kind else {
        panic!("expected object; got {:?}", widget.kind);
    };
    let name = spec.schema(object.properties[0].schema);
    let weight = spec.schema(object.properties[2].schema);

    // Both inline schemas are primitives, but they're still distinct.
    assert_ne!(name.id, weight.id);
    assert_eq!(name.path, "schemas.Widget.properties.name");
    assert_eq!(name.name, None);
    assert_eq!(object.properties[1].schema, spec.lookup("Color").unwrap());
}

#[test]
fn test_client_schemas_are_linked() {
    let doc = Document::from_yaml(WIDGETS).unwrap();
    let spec = ApiSpec::from_doc(&doc).unwrap();

    let client = &spec.clients[0];
    let endpoint = spec.schema(client.parameters[0].schema);
    assert_eq!(endpoint.path, "clients.WidgetManager.parameters.endpoint");

    let operation = &client.groups[0].operations[0];
    assert_eq!(operation.responses[0].schema, spec.lookup("Widget"));
    let widget_name = operation.parameters[0].schema.unwrap();
    assert_eq!(
        spec.schema(widget_name).path,
        "clients.WidgetManager.operationGroups.Widgets.operations.get.parameters.widgetName"
    );
}

#[test]
fn test_unresolvable_reference() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Widgets
        schemas:
          Widget:
            type: object
            properties:
              - name: owner
                schema:
                  $ref: Owner
    "})
    .unwrap();

    let result = ApiSpec::from_doc(&doc);

    assert_matches!(
        result,
        Err(GenerateError::UnresolvableTypeReference { path, reference })
            if path == "schemas.Widget.properties.owner" && reference == "Owner",
    );
}

#[test]
fn test_unresolvable_parent() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Widgets
        schemas:
          Widget:
            type: object
            parent:
              $ref: Thing
    "})
    .unwrap();

    let result = ApiSpec::from_doc(&doc);

    assert_matches!(
        result,
        Err(GenerateError::UnresolvableTypeReference { path, .. }) if path == "schemas.Widget.parent",
    );
}

#[test]
fn test_forward_references() {
    let doc = Document::from_yaml(indoc! {"
        info:
          title: Widgets
        schemas:
          Widgets:
            type: array
            items:
              $ref: Widget
          Widget:
            type: object
    "})
    .unwrap();

    let spec = ApiSpec::from_doc(&doc).unwrap();

    assert_matches!(
        spec.schema(SchemaId(0)).kind,
        RawSchemaKind::Array { items: SchemaId(1), xml_wrapped: false },
    );
}
