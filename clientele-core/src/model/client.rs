use super::types::{ClientTypeId, TypeRegistry};
use crate::parse::{HttpMethod, ParameterLocation};

/// The identity of a client in a [`ClientModel`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClientIndex(pub(crate) usize);

impl ClientIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The language-specific model of a client library, ready to render.
#[derive(Debug)]
pub struct ClientModel {
    pub title: String,
    pub types: TypeRegistry,
    /// Every client, ordered so that parents come before
    /// their children.
    pub clients: Vec<ServiceClient>,
}

impl ClientModel {
    #[inline]
    pub fn client(&self, index: ClientIndex) -> &ServiceClient {
        &self.clients[index.0]
    }

    /// Returns the clients that don't have a parent.
    pub fn roots(&self) -> impl Iterator<Item = &ServiceClient> {
        self.clients.iter().filter(|client| client.parent.is_none())
    }
}

/// A top-level client class.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    pub name: String,
    pub class_name: String,
    pub package: String,
    pub description: String,
    pub parent: Option<ClientIndex>,
    pub children: Vec<ClientIndex>,
    /// Pipeline handles first, then client parameters. A sub-client's
    /// inherited parameters come before its own.
    pub properties: Vec<ServiceClientProperty>,
    /// Constructor overloads, from fewest to most parameters.
    pub constructors: Vec<Constructor>,
    pub method_groups: Vec<MethodGroupClient>,
    /// The proxy for operations that belong to the client itself.
    pub proxy: Option<Proxy>,
    pub client_methods: Vec<ClientMethod>,
    /// Methods that create sub-clients.
    pub accessors: Vec<ClientAccessorMethod>,
}

impl ServiceClient {
    /// Returns the constructor with the most parameters.
    #[inline]
    pub fn max_constructor(&self) -> Option<&Constructor> {
        self.constructors.last()
    }

    /// Returns the properties that are set by constructor arguments.
    pub fn mutable_properties(&self) -> impl Iterator<Item = &ServiceClientProperty> {
        self.properties
            .iter()
            .filter(|property| matches!(property.kind, PropertyKind::Parameter { .. }))
            .filter(|property| !property.read_only)
    }

    /// Returns the property that holds the service endpoint.
    pub fn endpoint(&self) -> Option<&ServiceClientProperty> {
        self.properties.iter().find(|property| {
            matches!(
                property.kind,
                PropertyKind::Parameter {
                    location: ParameterLocation::Host
                }
            )
        })
    }
}

/// A property of a service client, with a field and a getter.
#[derive(Clone, Debug)]
pub struct ServiceClientProperty {
    pub name: String,
    pub ty: ClientTypeId,
    pub description: String,
    /// Read-only properties are initialized to `default_value`, instead of
    /// a constructor argument.
    pub read_only: bool,
    pub required: bool,
    /// A Java expression for the initial value of a read-only property.
    pub default_value: Option<String>,
    pub kind: PropertyKind,
    /// `true` if this property comes from the parent client.
    pub inherited: bool,
}

impl ServiceClientProperty {
    pub fn getter_name(&self) -> String {
        crate::codegen::naming::getter_name(&self.name)
    }

    /// Returns the constructor parameter that sets this property.
    pub fn to_parameter(&self) -> Parameter {
        Parameter {
            name: self.name.clone(),
            ty: self.ty,
            description: self.description.clone(),
            required: self.required,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropertyKind {
    /// An HTTP pipeline, serializer, or other runtime object.
    PipelineHandle,
    /// A client parameter.
    Parameter { location: ParameterLocation },
}

/// A constructor overload.
#[derive(Clone, Debug)]
pub struct Constructor {
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub body: ConstructorBody,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConstructorBody {
    /// Assigns every field.
    Initialize,
    /// Calls another overload with these arguments.
    Delegate(Vec<Argument>),
}

/// An argument to another constructor overload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Argument {
    /// Passes a parameter through.
    Forward(String),
    /// A new default HTTP pipeline.
    DefaultPipeline,
    /// A new default serializer adapter.
    DefaultSerializer,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    #[default]
    Public,
    PackagePrivate,
    Private,
}

impl Visibility {
    /// Returns the Java modifier, followed by a space, or an empty string
    /// for package-private declarations.
    pub fn modifier(self) -> &'static str {
        match self {
            Self::Public => "public ",
            Self::PackagePrivate => "",
            Self::Private => "private ",
        }
    }
}

/// A method or constructor parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: ClientTypeId,
    pub description: String,
    pub required: bool,
}

/// A class that holds the operations in one operation group.
#[derive(Clone, Debug)]
pub struct MethodGroupClient {
    pub name: String,
    pub class_name: String,
    pub package: String,
    /// The name of the field and getter suffix in the service client.
    pub variable_name: String,
    pub description: String,
    pub proxy: Proxy,
    pub client_methods: Vec<ClientMethod>,
}

/// An interface with one annotated method per HTTP call, implemented
/// at runtime by the HTTP pipeline.
#[derive(Clone, Debug)]
pub struct Proxy {
    pub name: String,
    pub service_name: String,
    /// The host template, like `{endpoint}`.
    pub base_url: String,
    pub methods: Vec<ProxyMethod>,
}

#[derive(Clone, Debug)]
pub struct ProxyMethod {
    pub name: String,
    pub operation: String,
    pub http_method: HttpMethod,
    pub path: String,
    pub expected_status_codes: Vec<u16>,
    /// Exceptions for specific status codes.
    pub exceptions: Vec<UnexpectedException>,
    /// The exception for all other unexpected status codes.
    pub default_exception: ClientTypeId,
    pub parameters: Vec<ProxyParameter>,
    pub return_type: ClientTypeId,
    pub is_sync: bool,
}

#[derive(Clone, Debug)]
pub struct UnexpectedException {
    pub ty: ClientTypeId,
    pub status_codes: Vec<u16>,
}

#[derive(Clone, Debug)]
pub struct ProxyParameter {
    pub name: String,
    pub serialized_name: String,
    pub location: ProxyParameterLocation,
    pub ty: ClientTypeId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProxyParameterLocation {
    Host,
    Path,
    Query,
    Header,
    Body { content_type: String },
    /// The per-call context, passed through to the pipeline.
    Context,
}

/// One generated variant of an operation.
#[derive(Clone, Debug)]
pub struct ClientMethod {
    pub name: String,
    pub operation: String,
    pub kind: ClientMethodKind,
    pub visibility: Visibility,
    pub description: String,
    /// The parameters in the method signature.
    pub parameters: Vec<Parameter>,
    /// The type of the response body, or `Void`.
    pub value_type: ClientTypeId,
    pub return_type: ClientTypeId,
    /// Null checks that run before any call, in order.
    pub validations: Vec<RequiredCheck>,
    /// Constant values that are declared as local variables.
    pub locals: Vec<LocalConstant>,
    /// The proxy method that this variant calls. Value-only variants
    /// call the with-response variant instead.
    pub proxy_method: Option<String>,
    /// Arguments to the proxy method, in order, without the context.
    pub proxy_arguments: Vec<String>,
    /// The with-response variant that a value-only variant calls.
    pub delegate: Option<String>,
    /// Exceptions for the method's documentation, in order.
    pub throws: Vec<ThrowsDoc>,
}

/// The generated variants of an operation, in the order that
/// they're declared.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClientMethodKind {
    /// Returns the full response asynchronously.
    WithResponseAsync,
    /// Returns only the response body asynchronously.
    ValueAsync,
    /// Returns the full response, and takes a context.
    WithResponseSync,
    /// Returns only the response body.
    ValueSync,
}

impl ClientMethodKind {
    #[inline]
    pub fn is_async(self) -> bool {
        matches!(self, Self::WithResponseAsync | Self::ValueAsync)
    }

    #[inline]
    pub fn is_with_response(self) -> bool {
        matches!(self, Self::WithResponseAsync | Self::WithResponseSync)
    }
}

/// A value that must not be `null` when a method is called.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequiredCheck {
    /// The Java expression to check, like `resourceGroupName` or
    /// `this.client.getEndpoint()`.
    pub expression: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocalConstant {
    pub name: String,
    pub ty: ClientTypeId,
    /// The Java literal for the value.
    pub value: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThrowsDoc {
    pub ty: ClientTypeId,
    pub description: String,
}

/// A method on a parent client that creates a sub-client.
#[derive(Clone, Debug)]
pub struct ClientAccessorMethod {
    pub name: String,
    pub sub_client: ClientIndex,
    /// The sub-client's own parameters, which the caller passes in.
    pub parameters: Vec<Parameter>,
    /// The sub-client constructor arguments: the parent's maximal
    /// constructor parameters, followed by `parameters`.
    pub arguments: Vec<String>,
    /// Parameters that must not be `null`.
    pub validations: Vec<RequiredCheck>,
}
