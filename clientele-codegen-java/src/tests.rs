//! Shared test-only helpers, and end-to-end tests for
//! the emitter.

use std::fmt::{Arguments, Debug};

use clientele_core::{
    error::GenerateError,
    ir::ApiSpec,
    mapper::map,
    model::ClientModel,
    parse::Document,
    settings::{RawSettings, Settings},
};
use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::{
    emit::{Emitter, GeneratedFiles},
    extension::{ExtraMethod, TemplateExtensions},
};

/// Asserts that an expression matches the given pattern.
///
/// The pattern can be optionally followed by a match guard, like
/// the unstable `assert_matches!()` macro (rust-lang/rust#82775).
macro_rules! assert_matches {
    ($left:expr, $($pattern:pat_param)|+ $(if $guard:expr)? $(,)?) => {
        match $left {
            $($pattern)|+ $(if $guard)? => {}
            ref left => {
                crate::tests::assert_matches_failed(
                    left,
                    stringify!($($pattern)|+ $(if $guard)?),
                    None,
                );
            }
        }
    };
}

pub(crate) use assert_matches;

#[track_caller]
pub(crate) fn assert_matches_failed(left: impl Debug, right: &str, message: Option<Arguments<'_>>) {
    let message = match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    };
    panic!(
        "{}",
        indoc::formatdoc! {"
            assertion `left matches right` failed{message}
              left: {left:?}
             right: {right}
        "},
    );
}

/// One client with one operation group, and the schemas it uses.
pub(crate) const WIDGETS: &str = indoc! {"
    info:
      title: Widget Manager
    settings:
      namespace: com.contoso.widgets
    schemas:
      Color:
        type: choice
        description: The color of a widget.
        choices:
          - value: red
          - value: blue
      Widget:
        type: object
        usage: [input, output]
        properties:
          - name: name
            schema:
              type: primitive
              format: string
            required: true
          - name: color
            schema:
              $ref: Color
          - name: weight
            schema:
              type: primitive
              format: int32
    clients:
      - name: WidgetManager
        parameters:
          - name: endpoint
            location: host
            required: true
            schema:
              type: primitive
              format: url
        operationGroups:
          - name: Widgets
            operations:
              - name: get
                method: get
                path: /widgets/{widgetName}
                parameters:
                  - name: widgetName
                    location: path
                    required: true
                    schema:
                      type: primitive
                      format: string
                  - name: accept
                    location: header
                    constant: application/json
                    schema:
                      type: primitive
                      format: string
                responses:
                  - statusCodes: [200]
                    schema:
                      $ref: Widget
"};

/// A root client with a fixed endpoint, and a sub-client that adds
/// its own parameter.
pub(crate) const SUB_CLIENTS: &str = indoc! {"
    info:
      title: Widgets
    settings:
      namespace: com.contoso.widgets
    clients:
      - name: Manager
        parameters:
          - name: endpoint
            location: host
            constant: https://management.contoso.com
            schema:
              type: primitive
              format: url
          - name: subscriptionId
            location: path
            required: true
            schema:
              type: primitive
              format: string
      - name: Widgets
        parent: Manager
        parameters:
          - name: scope
            location: path
            required: true
            schema:
              type: primitive
              format: string
        operationGroups:
          - operations:
              - name: list
                method: get
                path: /subscriptions/{subscriptionId}/{scope}/widgets
                parameters:
                  - name: subscriptionId
                    location: path
                    clientParameter: true
                  - name: scope
                    location: path
                    clientParameter: true
"};

/// Maps a document, with `overrides` layered over its settings.
pub(crate) fn model_with(yaml: &str, overrides: RawSettings) -> (ClientModel, Settings) {
    let (doc, settings) = document_with(yaml, overrides);
    let spec = ApiSpec::from_doc(&doc).unwrap();
    (map(&spec, &settings).unwrap(), settings)
}

fn document_with(yaml: &str, overrides: RawSettings) -> (Document, Settings) {
    let doc = Document::from_yaml(yaml).unwrap();
    let settings = Settings::resolve(doc.settings.clone().merge(overrides)).unwrap();
    (doc, settings)
}

fn generate(yaml: &str, overrides: RawSettings) -> Result<GeneratedFiles, GenerateError> {
    let (doc, settings) = document_with(yaml, overrides);
    Emitter::new(&settings).generate(&doc)
}

/// Returns the byte offsets of every match of `needle` in `haystack`.
fn offsets(haystack: &str, needle: &str) -> Vec<usize> {
    haystack
        .match_indices(needle)
        .map(|(offset, _)| offset)
        .collect()
}

// MARK: Files

#[test]
fn test_file_paths() {
    let files = generate(WIDGETS, RawSettings::default()).unwrap();

    let paths: Vec<_> = files.iter().map(|(path, _)| path).collect();
    assert_eq!(
        paths,
        [
            "src/main/java/com/contoso/widgets/implementation/WidgetManagerClient.java",
            "src/main/java/com/contoso/widgets/implementation/WidgetsImpl.java",
            "src/main/java/com/contoso/widgets/implementation/package-info.java",
            "src/main/java/com/contoso/widgets/models/Color.java",
            "src/main/java/com/contoso/widgets/models/Widget.java",
            "src/main/java/com/contoso/widgets/models/package-info.java",
        ]
    );
}

#[test]
fn test_file_imports() {
    let files = generate(WIDGETS, RawSettings::default()).unwrap();

    let widget = files
        .get("src/main/java/com/contoso/widgets/models/Widget.java")
        .unwrap();
    assert!(widget.starts_with(indoc! {"
        package com.contoso.widgets.models;

        import com.fasterxml.jackson.annotation.JsonProperty;

        /**
         * The Widget model.
         */
    "}));

    let group = files
        .get("src/main/java/com/contoso/widgets/implementation/WidgetsImpl.java")
        .unwrap();
    assert!(group.contains("import com.contoso.widgets.models.Widget;\n"));
    assert!(group.contains("import com.azure.core.util.FluxUtil;\n"));
    // Same package, and `java.lang`.
    assert!(!group.contains("import com.contoso.widgets.implementation."));
    assert!(!group.contains("import java.lang."));
}

#[test]
fn test_license_header() {
    let files = generate(
        WIDGETS,
        RawSettings {
            license_header: Some("Copyright (c) Contoso.\n\nLicensed under the MIT License.".to_owned()),
            ..Default::default()
        },
    )
    .unwrap();

    for (path, contents) in files.iter() {
        assert!(
            contents.starts_with(indoc! {"
                // Copyright (c) Contoso.
                //
                // Licensed under the MIT License.

            "}),
            "`{path}` is missing the license header"
        );
    }
}

#[test]
fn test_duplicate_file() {
    let mut files = GeneratedFiles::default();
    files
        .insert(("src/main/java/Widget.java".to_owned(), String::new()))
        .unwrap();

    assert_matches!(
        files.insert(("src/main/java/Widget.java".to_owned(), String::new())),
        Err(GenerateError::DuplicateFile(path)) if path == "src/main/java/Widget.java",
    );
    assert_eq!(files.len(), 1);
}

// MARK: Properties

#[test]
fn test_determinism() {
    let first = generate(SCENARIOS, RawSettings::default()).unwrap();
    let second = generate(SCENARIOS, RawSettings::default()).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_null_checks_precede_calls() {
    for overrides in [
        RawSettings::default(),
        RawSettings {
            pipeline_generation: Some(clientele_core::settings::PipelineGeneration::ClientCore),
            ..Default::default()
        },
    ] {
        let files = generate(SCENARIOS, overrides).unwrap();
        for (path, contents) in files.iter() {
            for method in contents.split("@ServiceMethod").skip(1) {
                let Some(&call) = offsets(method, "service.").first() else {
                    continue;
                };
                for check in offsets(method, "== null") {
                    assert!(check < call, "`{path}` calls the service before a check");
                }
            }
        }
    }
}

#[test]
fn test_render_failure_writes_nothing() {
    let yaml = indoc! {"
        info:
          title: Broken
        settings:
          namespace: com.contoso.broken
        schemas:
          Widget:
            type: object
            properties:
              - name: gadget
                schema:
                  $ref: Gadget
    "};

    assert_matches!(
        generate(yaml, RawSettings::default()),
        Err(GenerateError::UnresolvableTypeReference { reference, .. }) if reference == "Gadget",
    );
}

// MARK: Scenarios

const SCENARIOS: &str = indoc! {"
    info:
      title: Widget Manager
    settings:
      namespace: com.contoso.widgets
    schemas:
      Widget:
        type: object
        properties:
          - name: name
            schema:
              type: primitive
              format: string
      Widgets:
        type: array
        xmlWrapped: true
        items:
          $ref: Widget
    clients:
      - name: WidgetManager
        parameters:
          - name: endpoint
            location: host
            required: true
            schema:
              type: primitive
              format: url
        operationGroups:
          - name: Widgets
            operations:
              - name: patch
                method: patch
                path: /resourceGroups/{resourceGroupName}/widgets/{widgetName}
                parameters:
                  - name: resourceGroupName
                    location: path
                    required: true
                    schema:
                      type: primitive
                      format: string
                  - name: widgetName
                    location: path
                    required: true
                    schema:
                      type: primitive
                      format: string
                  - name: properties
                    location: body
                    required: true
                    schema:
                      $ref: Widget
                responses:
                  - statusCodes: [200]
                    schema:
                      $ref: Widget
              - name: list
                method: get
                path: /widgets
                responses:
                  - statusCodes: [200]
                    schema:
                      $ref: Widgets
"};

#[test]
fn test_required_parameter_is_checked_before_call() {
    let files = generate(SCENARIOS, RawSettings::default()).unwrap();
    let group = files
        .get("src/main/java/com/contoso/widgets/implementation/WidgetsImpl.java")
        .unwrap();

    assert!(group.contains(
        "    public Widget patch(String resourceGroupName, String widgetName, Widget properties) {\n"
    ));
    assert!(group.contains(
        "        return patchWithResponse(resourceGroupName, widgetName, properties, Context.NONE)\
        .getValue();\n"
    ));

    let start = group
        .find("public Response<Widget> patchWithResponse(")
        .unwrap();
    let method = &group[start..];
    let check = method.find("if (resourceGroupName == null) {").unwrap();
    let call = method.find("return service.patchSync(").unwrap();
    assert!(check < call);
    assert!(method.contains(
        "throw LOGGER.atError().log(new IllegalArgumentException(\
        \"Parameter resourceGroupName is required and cannot be null.\"));"
    ));
    assert!(group.contains(
        "@BodyParam(\"application/json\") Widget properties, Context context);"
    ));
}

#[test]
fn test_xml_wrapper_file() {
    let files = generate(SCENARIOS, RawSettings::default()).unwrap();

    let wrapper = files
        .get("src/main/java/com/contoso/widgets/implementation/models/WidgetWrapper.java")
        .unwrap();
    assert!(wrapper.contains("@JacksonXmlRootElement(localName = \"Widgets\")\n"));
    assert!(wrapper.contains("import com.contoso.widgets.models.Widget;\n"));
    assert!(files
        .get("src/main/java/com/contoso/widgets/implementation/models/package-info.java")
        .unwrap()
        .contains("Package containing the data models for Widget Manager."));

    let group = files
        .get("src/main/java/com/contoso/widgets/implementation/WidgetsImpl.java")
        .unwrap();
    assert!(group.contains("public WidgetWrapper list() {"));
}

#[test]
fn test_sub_client_accessor_file() {
    let files = generate(SUB_CLIENTS, RawSettings::default()).unwrap();

    let manager = files
        .get("src/main/java/com/contoso/widgets/implementation/ManagerClient.java")
        .unwrap();
    let accessor = manager.find("public WidgetsClient getWidgets(String scope) {").unwrap();
    let check = manager.find("if (scope == null) {").unwrap();
    let construct = manager
        .find("return new WidgetsClient(this.httpPipeline, this.subscriptionId, scope);")
        .unwrap();
    assert!(accessor < check && check < construct);
}

#[test]
fn test_groups_with_the_same_name_in_two_clients() {
    let yaml = indoc! {"
        info:
          title: Two
        settings:
          namespace: com.contoso.two
        clients:
          - name: Alpha
            parameters:
              - name: endpoint
                location: host
                required: true
                schema:
                  type: primitive
                  format: url
            operationGroups:
              - name: Operations
                operations:
                  - name: list
                    method: get
                    path: /alpha
          - name: Beta
            parameters:
              - name: endpoint
                location: host
                required: true
                schema:
                  type: primitive
                  format: url
            operationGroups:
              - name: Operations
                operations:
                  - name: list
                    method: get
                    path: /beta
    "};
    let files = generate(yaml, RawSettings::default()).unwrap();

    let alpha = files
        .get("src/main/java/com/contoso/two/implementation/OperationsImpl.java")
        .unwrap();
    assert!(alpha.contains("public final class OperationsImpl {"));
    assert!(alpha.contains("private final AlphaClient client;"));

    let beta = files
        .get("src/main/java/com/contoso/two/implementation/OperationsImpl2.java")
        .unwrap();
    assert!(beta.contains("public final class OperationsImpl2 {"));
    assert!(beta.contains("private final BetaClient client;"));
    assert!(beta.contains("OperationsImpl2(BetaClient client) {"));
    assert!(beta.contains("public interface OperationsService2 {"));

    let client = files
        .get("src/main/java/com/contoso/two/implementation/BetaClient.java")
        .unwrap();
    assert!(client.contains("this.operations = new OperationsImpl2(this);"));
}

#[test]
fn test_enum_constant_with_custom_factory() {
    let yaml = indoc! {"
        info:
          title: Versions
        settings:
          namespace: com.contoso.versions
        schemas:
          Version:
            type: choice
            deserializationMethod: parse
            choices:
              - value: v1
              - value: v2
        clients:
          - name: Versions
            parameters:
              - name: apiVersion
                location: query
                constant: v1
                schema:
                  $ref: Version
    "};
    let files = generate(yaml, RawSettings::default()).unwrap();

    let client = files
        .get("src/main/java/com/contoso/versions/implementation/VersionsClient.java")
        .unwrap();
    assert!(client.contains("this.apiVersion = Version.parse(\"v1\");"));

    let version = files
        .get("src/main/java/com/contoso/versions/models/Version.java")
        .unwrap();
    assert!(version.contains("public final class Version extends ExpandableStringEnum<Version> {"));
    assert!(version.contains("public static Version parse(String name) {"));
}

// MARK: Extensions

#[test]
fn test_extensions() {
    let (doc, settings) = document_with(WIDGETS, RawSettings::default());
    let extensions = TemplateExtensions::new()
        .with_method(
            ExtraMethod::new("public boolean isNamed()")
                .line("return Objects.nonNull(this.name);")
                .import("java.util.Objects"),
        )
        .with_block(|w, _| {
            w.line("private static final int MAX_WEIGHT = 100;");
        });

    let files = Emitter::new(&settings)
        .with_extensions("com.contoso.widgets.models.Widget", extensions)
        .generate(&doc)
        .unwrap();

    let widget = files
        .get("src/main/java/com/contoso/widgets/models/Widget.java")
        .unwrap();
    assert!(widget.contains("import java.util.Objects;\n"));
    assert!(widget.ends_with(indoc! {"

            public boolean isNamed() {
                return Objects.nonNull(this.name);
            }

            private static final int MAX_WEIGHT = 100;
        }
    "}));

    // Other classes don't get the extensions.
    let color = files
        .get("src/main/java/com/contoso/widgets/models/Color.java")
        .unwrap();
    assert!(!color.contains("isNamed"));
}
