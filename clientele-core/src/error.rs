use miette::Diagnostic;

use crate::parse::BadPath;

/// An error that occurs while deserializing an API description.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum SerdeError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    YamlWithPath(#[from] serde_path_to_error::Error<serde_yaml::Error>),
}

/// An invalid or contradictory combination of generator settings.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum ConfigurationError {
    #[error("missing required setting `{0}`")]
    #[diagnostic(
        code(clientele::settings::missing),
        help("set it in the API description's `settings`, or in a settings file")
    )]
    Missing(&'static str),

    #[error("setting `{key}` = `{value}` isn't a valid Java package name")]
    #[diagnostic(code(clientele::settings::invalid_package))]
    InvalidPackage { key: &'static str, value: String },

    #[error("`{first} = {first_value}` can't be combined with `{second} = {second_value}`")]
    #[diagnostic(code(clientele::settings::conflict))]
    Conflict {
        first: &'static str,
        first_value: &'static str,
        second: &'static str,
        second_value: &'static str,
    },

    #[error("client `{0}` is defined more than once")]
    #[diagnostic(code(clientele::clients::duplicate))]
    DuplicateClient(String),

    #[error("client `{client}` names parent `{parent}`, which isn't defined")]
    #[diagnostic(code(clientele::clients::unknown_parent))]
    UnknownParentClient { client: String, parent: String },

    #[error("client `{0}` is its own ancestor")]
    #[diagnostic(code(clientele::clients::cyclic_parent))]
    CyclicClientParent(String),

    #[error("client `{0}` has operations, but no `host` parameter to send them to")]
    #[diagnostic(
        code(clientele::clients::missing_endpoint),
        help("add a client parameter with `location: host`")
    )]
    MissingEndpoint(String),

    #[error("client `{client}` declares parameter `{parameter}` more than once")]
    #[diagnostic(code(clientele::clients::duplicate_parameter))]
    DuplicateClientParameter { client: String, parameter: String },

    #[error("parameter `{parameter}` of client `{client}` has the name of a built-in client property")]
    #[diagnostic(
        code(clientele::clients::reserved_parameter),
        help("`httpPipeline`, `serializerAdapter`, `defaultPollInterval`, and `instrumentation` are reserved")
    )]
    ReservedClientParameter { client: String, parameter: String },
}

/// An error that stops client generation.
///
/// Generation is all-or-nothing: once any of these errors occurs,
/// no files are written.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("`{path}` refers to schema `{reference}`, which isn't defined")]
    #[diagnostic(code(clientele::types::unresolvable))]
    UnresolvableTypeReference { path: String, reference: String },

    #[error("schema `{path}` contains itself")]
    #[diagnostic(
        code(clientele::types::cyclic),
        help("arrays, dictionaries, unions, and parents can't refer back to their own schema")
    )]
    CyclicTypeReference { path: String },

    #[error(
        "operation `{operation}` uses client parameter `{parameter}`, \
        which client `{client}` doesn't declare"
    )]
    #[diagnostic(code(clientele::clients::unresolvable_parameter))]
    UnresolvableParameterReference {
        client: String,
        operation: String,
        parameter: String,
    },

    #[error("path `{path}` of operation `{operation}` has no parameter for `{{{parameter}}}`")]
    #[diagnostic(code(clientele::clients::unbound_path_parameter))]
    UnboundPathParameter {
        operation: String,
        path: String,
        parameter: String,
    },

    #[error("operation `{operation}` has an invalid path")]
    #[diagnostic(code(clientele::clients::bad_path))]
    BadPath {
        operation: String,
        #[source]
        #[diagnostic_source]
        source: BadPath,
    },

    #[error("member `{member}` of enum `{name}` collides with an earlier member")]
    #[diagnostic(code(clientele::types::enum_member_collision))]
    NamingCollisionExhausted { name: String, member: String },

    #[error("more than one generated file would be written to `{0}`")]
    #[diagnostic(code(clientele::emit::duplicate_file))]
    DuplicateFile(String),
}
