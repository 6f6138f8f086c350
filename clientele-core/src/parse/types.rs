use std::{collections::BTreeSet, fmt::Display};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{error::SerdeError, settings::RawSettings};

/// A language-agnostic API description.
#[derive(Debug, Deserialize)]
pub struct Document {
    pub info: Info,
    #[serde(default)]
    pub settings: RawSettings,
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaDef>,
    #[serde(default)]
    pub clients: Vec<ClientDef>,
}

impl Document {
    /// Parses an API description from a YAML or JSON string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SerdeError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        let result = serde_path_to_error::deserialize(deserializer)?;
        Ok(result)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// A schema definition. The `type` field selects the kind of schema.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SchemaDef {
    Primitive(PrimitiveDef),
    Array(ArrayDef),
    Dictionary(DictionaryDef),
    Choice(ChoiceDef),
    Object(ObjectDef),
    Union(UnionDef),
}

impl SchemaDef {
    pub fn info(&self) -> &SchemaInfo {
        match self {
            Self::Primitive(def) => &def.info,
            Self::Array(def) => &def.info,
            Self::Dictionary(def) => &def.info,
            Self::Choice(def) => &def.info,
            Self::Object(def) => &def.info,
            Self::Union(def) => &def.info,
        }
    }
}

/// Fields common to all schemas.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SchemaInfo {
    #[serde(default)]
    pub name: Option<String>,
    /// Overrides the base namespace for the generated type.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage: BTreeSet<SchemaUsage>,
}

impl SchemaInfo {
    /// Returns `true` if the schema is only used inside the client,
    /// and never exposed to callers.
    pub fn is_internal(&self) -> bool {
        self.usage.contains(&SchemaUsage::Internal) && !self.usage.contains(&SchemaUsage::Public)
    }
}

/// A context in which a schema is used.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaUsage {
    Input,
    Output,
    Exception,
    Internal,
    Public,
    XmlWrapped,
}

#[derive(Debug, Deserialize)]
pub struct PrimitiveDef {
    #[serde(flatten)]
    pub info: SchemaInfo,
    pub format: PrimitiveFormat,
}

/// The wire format of a primitive value.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveFormat {
    #[default]
    String,
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    Date,
    DateTime,
    Duration,
    Uuid,
    Url,
    Bytes,
    Binary,
    Any,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayDef {
    #[serde(flatten)]
    pub info: SchemaInfo,
    pub items: RefOrSchema,
    #[serde(default)]
    pub xml_wrapped: bool,
}

#[derive(Debug, Deserialize)]
pub struct DictionaryDef {
    #[serde(flatten)]
    pub info: SchemaInfo,
    pub values: RefOrSchema,
}

/// An enumeration of allowed values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDef {
    #[serde(flatten)]
    pub info: SchemaInfo,
    /// The type of the values.
    #[serde(default)]
    pub choice_type: PrimitiveFormat,
    /// If `false`, the service may return values that aren't listed here.
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub choices: Vec<ChoiceValueDef>,
    /// Overrides the name of the method that converts a member to
    /// its wire value.
    #[serde(default)]
    pub serialization_method: Option<String>,
    /// Overrides the name of the method that converts a wire value to
    /// a member.
    #[serde(default)]
    pub deserialization_method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceValueDef {
    pub value: ChoiceValue,
    /// The source name of this value, if it's different from the value.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A wire value for an enum member.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum ChoiceValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl Display for ChoiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDef {
    #[serde(flatten)]
    pub info: SchemaInfo,
    #[serde(default)]
    pub parent: Option<Reference>,
    /// The name of the property that selects a subtype.
    #[serde(default)]
    pub discriminator: Option<String>,
    /// The discriminator value that selects this type.
    #[serde(default)]
    pub discriminator_value: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    #[serde(default)]
    pub serialized_name: Option<String>,
    pub schema: RefOrSchema,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnionDef {
    #[serde(flatten)]
    pub info: SchemaInfo,
    pub variants: Vec<RefOrSchema>,
}

/// A reference to a named schema.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub name: String,
}

/// Either a reference to a named schema, or an inline schema.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RefOrSchema {
    Ref(Reference),
    Other(Box<SchemaDef>),
}

/// A service client, and the operations that it exposes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The client that hands out instances of this client.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ClientParameterDef>,
    #[serde(default)]
    pub operation_groups: Vec<OperationGroupDef>,
}

/// A parameter that's set once, when the client is constructed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientParameterDef {
    pub name: String,
    pub schema: RefOrSchema,
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    /// A fixed value for this parameter. Constant parameters aren't
    /// passed to the constructor.
    #[serde(default)]
    pub constant: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OperationGroupDef {
    /// The group name, or an empty string for operations that
    /// belong to the client itself.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub operations: Vec<OperationDef>,
}

#[derive(Debug, Deserialize)]
pub struct OperationDef {
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
    #[serde(default)]
    pub responses: Vec<ResponseDef>,
    #[serde(default)]
    pub exceptions: Vec<ExceptionDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDef {
    pub name: String,
    /// The name of the parameter on the wire, if it's different
    /// from `name`.
    #[serde(default)]
    pub serialized_name: Option<String>,
    pub location: ParameterLocation,
    /// The schema of the parameter value. Optional for client parameters,
    /// which take their schema from the client.
    #[serde(default)]
    pub schema: Option<RefOrSchema>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub constant: Option<String>,
    /// If `true`, the value comes from the client parameter of
    /// the same name.
    #[serde(default)]
    pub client_parameter: bool,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl ParameterDef {
    pub fn serialized_name(&self) -> &str {
        self.serialized_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Host,
    Path,
    Query,
    Header,
    Body,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "patch")]
    Patch,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "head")]
    Head,
    #[serde(alias = "options")]
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDef {
    #[serde(default)]
    pub status_codes: Vec<u16>,
    #[serde(default)]
    pub schema: Option<RefOrSchema>,
}

impl ResponseDef {
    /// Returns `true` if this response describes a successful request.
    /// A response without status codes is the default success response.
    pub fn is_success(&self) -> bool {
        self.status_codes.is_empty() || self.status_codes.iter().any(|code| (200..300).contains(code))
    }
}

/// An error response, and the exception that it's mapped to.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDef {
    /// The status codes for this exception, or empty for
    /// the default exception.
    #[serde(default)]
    pub status_codes: Vec<u16>,
    /// The fully qualified name of the exception class.
    pub exception_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    use crate::{settings::PipelineGeneration, tests::assert_matches};

    #[test]
    fn test_parse_schemas() {
        let doc = Document::from_yaml(indoc! {"
            info:
              title: Widgets
            schemas:
              Color:
                type: choice
                choices:
                  - value: red
                  - value: 2
                  - value: true
              Widget:
                type: object
                usage: [input, output]
                properties:
                  - name: color
                    schema:
                      $ref: Color
                  - name: tags
                    schema:
                      type: array
                      items:
                        type: primitive
                        format: string
        "})
        .unwrap();

        assert_eq!(doc.info.title, "Widgets");
        assert_eq!(doc.schemas.len(), 2);

        let SchemaDef::Choice(color) = &doc.schemas["Color"] else {
            panic!("expected choice; got {:?}", doc.schemas["Color"]);
        };
        assert_eq!(color.choice_type, PrimitiveFormat::String);
        assert!(!color.sealed);
        assert_eq!(
            color
                .choices
                .iter()
                .map(|choice| choice.value.to_string())
                .collect::<Vec<_>>(),
            vec!["red", "2", "true"]
        );

        let SchemaDef::Object(widget) = &doc.schemas["Widget"] else {
            panic!("expected object; got {:?}", doc.schemas["Widget"]);
        };
        assert_eq!(
            widget.info.usage,
            BTreeSet::from([SchemaUsage::Input, SchemaUsage::Output])
        );
        assert_matches!(
            &widget.properties[0].schema,
            RefOrSchema::Ref(Reference { name }) if name == "Color",
        );
        assert_matches!(
            &widget.properties[1].schema,
            RefOrSchema::Other(schema) if matches!(**schema, SchemaDef::Array(_)),
        );
    }

    #[test]
    fn test_parse_settings() {
        let doc = Document::from_yaml(indoc! {"
            info:
              title: Widgets
            settings:
              namespace: com.contoso.widgets
              isFluent: true
              pipelineGeneration: azure-v1
              customTypes: [Widget]
        "})
        .unwrap();

        assert_eq!(doc.settings.namespace.as_deref(), Some("com.contoso.widgets"));
        assert_eq!(doc.settings.is_fluent, Some(true));
        assert_eq!(
            doc.settings.pipeline_generation,
            Some(PipelineGeneration::AzureV1)
        );
        assert_eq!(doc.settings.custom_types, Some(vec!["Widget".to_owned()]));
    }

    #[test]
    fn test_parse_clients() {
        let doc = Document::from_yaml(indoc! {"
            info:
              title: Widgets
            clients:
              - name: Widgets
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
                        path: /widgets/{name}
                        parameters:
                          - name: name
                            location: path
                            required: true
                            schema:
                              type: primitive
                              format: string
                        responses:
                          - statusCodes: [200]
                        exceptions:
                          - statusCodes: [404]
                            exceptionType: com.azure.core.exception.ResourceNotFoundException
        "})
        .unwrap();

        let client = &doc.clients[0];
        assert_eq!(client.parameters[0].location, ParameterLocation::Host);
        let operation = &client.operation_groups[0].operations[0];
        assert_eq!(operation.method, HttpMethod::Get);
        assert_eq!(operation.parameters[0].serialized_name(), "name");
        assert!(operation.responses[0].is_success());
        assert_eq!(operation.exceptions[0].status_codes, vec![404]);
    }

    #[test]
    fn test_unknown_schema_type_has_path() {
        let result = Document::from_yaml(indoc! {"
            info:
              title: Widgets
            schemas:
              Widget:
                type: tuple
        "});

        let Err(SerdeError::YamlWithPath(err)) = result else {
            panic!("expected error with path; got {result:?}");
        };
        assert!(err.path().to_string().starts_with("schemas.Widget"));
    }
}
