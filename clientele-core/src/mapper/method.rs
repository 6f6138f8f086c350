use std::collections::BTreeSet;

use tracing::debug;

use super::{describe, known::Known, type_::TypeMapper};
use crate::{
    codegen::{
        NameScope,
        naming::{string_literal, variable_name},
    },
    error::GenerateError,
    ir::RawOperation,
    model::{
        ClassType, ClientMethod, ClientMethodKind, ClientType, ClientTypeId, LocalConstant,
        Parameter, PrimitiveType, PropertyKind, ProxyMethod, ProxyParameter,
        ProxyParameterLocation, RequiredCheck, ServiceClientProperty, ThrowsDoc,
        UnexpectedException, Visibility,
    },
    parse::{ParameterLocation, path},
};

/// Expands operations into proxy methods and client method variants,
/// for one client or method group.
#[derive(Debug)]
pub struct OperationMapper<'m, 'a> {
    types: &'m mut TypeMapper<'a>,
    /// The name of the client, for errors.
    client: &'m str,
    /// The properties of the service client that owns the operations.
    properties: &'m [ServiceClientProperty],
    /// The Java expression for the service client, like `this` or
    /// `this.client`.
    client_reference: &'static str,
}

/// The methods for one operation.
#[derive(Debug, Default)]
pub struct OperationMethods {
    pub proxy_methods: Vec<ProxyMethod>,
    pub client_methods: Vec<ClientMethod>,
}

impl<'m, 'a> OperationMapper<'m, 'a> {
    pub fn new(
        types: &'m mut TypeMapper<'a>,
        client: &'m str,
        properties: &'m [ServiceClientProperty],
        client_reference: &'static str,
    ) -> Self {
        Self {
            types,
            client,
            properties,
            client_reference,
        }
    }

    /// Expands every operation, in order.
    pub fn map_all<'o>(
        &mut self,
        operations: impl IntoIterator<Item = &'o RawOperation<'a>>,
    ) -> Result<OperationMethods, GenerateError>
    where
        'a: 'o,
    {
        let mut methods = OperationMethods::default();
        for operation in operations {
            let OperationMethods {
                proxy_methods,
                client_methods,
            } = self.map(operation)?;
            methods.proxy_methods.extend(proxy_methods);
            methods.client_methods.extend(client_methods);
        }
        Ok(methods)
    }

    /// Expands one operation into its proxy methods, and its client
    /// method variants in declaration order.
    pub fn map(&mut self, operation: &RawOperation<'a>) -> Result<OperationMethods, GenerateError> {
        let settings = self.types.settings();
        let generation = settings.pipeline_generation();
        let def = operation.def;
        let name = variable_name(&def.name);
        self.check_path(operation)?;

        let value_type = self.types.expected_response_body_type(operation)?;
        let context_type = self.types.known(Known::Context);
        let context_name = if generation.is_azure() {
            "context"
        } else {
            "requestContext"
        };

        let mut scope = NameScope::with_reserved([context_name]);
        let mut proxy_parameters = Vec::new();
        let mut proxy_arguments = Vec::new();
        let mut signature = Vec::new();
        let mut client_checks = Vec::new();
        let mut parameter_checks = Vec::new();
        let mut locals = Vec::new();

        // Every call needs a host, even if the operation doesn't
        // declare one.
        let declares_host = operation
            .parameters
            .iter()
            .any(|parameter| parameter.def.location == ParameterLocation::Host);
        if !declares_host
            && let Some(endpoint) = self.properties.iter().find(|property| {
                property.kind
                    == PropertyKind::Parameter {
                        location: ParameterLocation::Host,
                    }
            })
        {
            let expression = format!("{}.{}()", self.client_reference, endpoint.getter_name());
            if self.is_checked(endpoint) {
                client_checks.push(RequiredCheck {
                    expression: expression.clone(),
                });
            }
            proxy_parameters.push(ProxyParameter {
                name: endpoint.name.clone(),
                serialized_name: endpoint.name.clone(),
                location: ProxyParameterLocation::Host,
                ty: endpoint.ty,
            });
            proxy_arguments.push(expression);
        }

        // Bodies go last.
        let parameters = operation
            .parameters
            .iter()
            .filter(|parameter| parameter.def.location != ParameterLocation::Body)
            .chain(
                operation
                    .parameters
                    .iter()
                    .filter(|parameter| parameter.def.location == ParameterLocation::Body),
            );
        for parameter in parameters {
            let location = match parameter.def.location {
                ParameterLocation::Host => ProxyParameterLocation::Host,
                ParameterLocation::Path => ProxyParameterLocation::Path,
                ParameterLocation::Query => ProxyParameterLocation::Query,
                ParameterLocation::Header => ProxyParameterLocation::Header,
                ParameterLocation::Body => ProxyParameterLocation::Body {
                    content_type: parameter
                        .def
                        .content_type
                        .clone()
                        .unwrap_or_else(|| "application/json".to_owned()),
                },
            };
            let serialized_name = parameter.def.serialized_name().to_owned();

            if parameter.def.client_parameter {
                let property_name = variable_name(&parameter.def.name);
                let Some(property) = self.properties.iter().find(|property| {
                    property.name == property_name
                        && matches!(property.kind, PropertyKind::Parameter { .. })
                }) else {
                    return Err(GenerateError::UnresolvableParameterReference {
                        client: self.client.to_owned(),
                        operation: def.name.clone(),
                        parameter: parameter.def.name.clone(),
                    });
                };
                let expression = format!("{}.{}()", self.client_reference, property.getter_name());
                if self.is_checked(property) {
                    client_checks.push(RequiredCheck {
                        expression: expression.clone(),
                    });
                }
                proxy_parameters.push(ProxyParameter {
                    name: property_name,
                    serialized_name,
                    location,
                    ty: property.ty,
                });
                proxy_arguments.push(expression);
                continue;
            }

            let ty = match parameter.schema {
                Some(schema) => self.types.resolve(schema)?,
                None => self.types.types_mut().primitive(PrimitiveType::String),
            };
            let local = scope
                .uniquify(&variable_name(&parameter.def.name))
                .into_owned();
            if let Some(constant) = &parameter.def.constant {
                locals.push(LocalConstant {
                    name: local.clone(),
                    ty,
                    value: java_literal(constant, self.types.types().get(ty)),
                });
            } else {
                if parameter.def.required && self.types.types().is_nullable(ty) {
                    parameter_checks.push(RequiredCheck {
                        expression: local.clone(),
                    });
                }
                signature.push(Parameter {
                    name: local.clone(),
                    ty,
                    description: parameter
                        .def
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("The {local} parameter.")),
                    required: parameter.def.required,
                });
            }
            proxy_parameters.push(ProxyParameter {
                name: local.clone(),
                serialized_name,
                location,
                ty,
            });
            proxy_arguments.push(local);
        }
        proxy_parameters.push(ProxyParameter {
            name: context_name.to_owned(),
            serialized_name: context_name.to_owned(),
            location: ProxyParameterLocation::Context,
            ty: context_type,
        });

        let mut expected_status_codes: BTreeSet<u16> = operation
            .responses
            .iter()
            .filter(|response| response.def.is_success())
            .flat_map(|response| response.def.status_codes.iter().copied())
            .collect();
        if expected_status_codes.is_empty() {
            expected_status_codes.insert(200);
        }
        let expected_status_codes: Vec<u16> = expected_status_codes.into_iter().collect();

        let exceptions: Vec<UnexpectedException> = def
            .exceptions
            .iter()
            .filter(|exception| !exception.status_codes.is_empty())
            .map(|exception| UnexpectedException {
                ty: self.exception(&exception.exception_type),
                status_codes: exception.status_codes.clone(),
            })
            .collect();
        let default_exception = match def
            .exceptions
            .iter()
            .find(|exception| exception.status_codes.is_empty())
        {
            Some(exception) => self.exception(&exception.exception_type),
            None => self.types.default_exception(),
        };

        let (response_package, response_name) = Known::Response.qualified(generation);
        let response_type =
            self.types
                .types_mut()
                .generic(response_package, response_name, vec![value_type]);
        let (mono_package, mono_name) = Known::Mono.qualified(generation);
        let async_response_type =
            self.types
                .types_mut()
                .generic(mono_package, mono_name, vec![response_type]);
        let async_value_type = self
            .types
            .types_mut()
            .generic(mono_package, mono_name, vec![value_type]);

        let description = describe(def.summary.as_deref(), def.description.as_deref())
            .unwrap_or_else(|| format!("The {name} operation."));
        let mut throws = vec![
            ThrowsDoc {
                ty: self.types.known(Known::IllegalArgumentException),
                description: "thrown if parameters fail the validation.".to_owned(),
            },
            ThrowsDoc {
                ty: default_exception,
                description: "thrown if the request is rejected by server.".to_owned(),
            },
        ];
        throws.extend(exceptions.iter().map(|exception| ThrowsDoc {
            ty: exception.ty,
            description: format!(
                "thrown if the request is rejected by server on status code {}.",
                itertools::join(&exception.status_codes, ", ")
            ),
        }));
        throws.push(ThrowsDoc {
            ty: self.types.known(Known::RuntimeException),
            description: "all other wrapped checked exceptions if the request fails to be sent."
                .to_owned(),
        });

        let validations: Vec<RequiredCheck> =
            client_checks.into_iter().chain(parameter_checks).collect();
        let proxy_method = |name: String, return_type: ClientTypeId, is_sync: bool| ProxyMethod {
            name,
            operation: def.name.clone(),
            http_method: def.method,
            path: def.path.clone(),
            expected_status_codes: expected_status_codes.clone(),
            exceptions: exceptions.clone(),
            default_exception,
            parameters: proxy_parameters.clone(),
            return_type,
            is_sync,
        };
        let client_method = |name: String, kind: ClientMethodKind| ClientMethod {
            name,
            operation: def.name.clone(),
            kind,
            visibility: Visibility::Public,
            description: description.clone(),
            parameters: signature.clone(),
            value_type,
            return_type: value_type,
            validations: Vec::new(),
            locals: Vec::new(),
            proxy_method: None,
            proxy_arguments: Vec::new(),
            delegate: None,
            throws: throws.clone(),
        };

        let mut methods = OperationMethods::default();
        let generate_async = settings.generate_async_methods();
        if generate_async {
            methods
                .proxy_methods
                .push(proxy_method(name.clone(), async_response_type, false));
            methods.client_methods.extend([
                ClientMethod {
                    return_type: async_response_type,
                    validations: validations.clone(),
                    locals: locals.clone(),
                    proxy_method: Some(name.clone()),
                    proxy_arguments: proxy_arguments.clone(),
                    ..client_method(format!("{name}WithResponseAsync"), ClientMethodKind::WithResponseAsync)
                },
                ClientMethod {
                    return_type: async_value_type,
                    delegate: Some(format!("{name}WithResponseAsync")),
                    ..client_method(format!("{name}Async"), ClientMethodKind::ValueAsync)
                },
            ]);
        }
        if settings.generate_sync_methods() {
            let sync_proxy = if generate_async {
                format!("{name}Sync")
            } else {
                name.clone()
            };
            methods
                .proxy_methods
                .push(proxy_method(sync_proxy.clone(), response_type, true));
            let mut parameters = signature.clone();
            parameters.push(Parameter {
                name: context_name.to_owned(),
                ty: context_type,
                description: "The context to associate with this operation.".to_owned(),
                required: false,
            });
            methods.client_methods.extend([
                ClientMethod {
                    parameters,
                    return_type: response_type,
                    validations,
                    locals,
                    proxy_method: Some(sync_proxy),
                    proxy_arguments,
                    ..client_method(format!("{name}WithResponse"), ClientMethodKind::WithResponseSync)
                },
                ClientMethod {
                    delegate: Some(format!("{name}WithResponse")),
                    ..client_method(name.clone(), ClientMethodKind::ValueSync)
                },
            ]);
        }
        debug!(
            client = self.client,
            operation = %def.name,
            variants = methods.client_methods.len(),
            "Expanded operation"
        );
        Ok(methods)
    }

    /// Checks that the operation's path is well-formed, and that every
    /// path template parameter is bound.
    fn check_path(&self, operation: &RawOperation<'_>) -> Result<(), GenerateError> {
        let def = operation.def;
        let segments = path::parse(&def.path).map_err(|source| GenerateError::BadPath {
            operation: def.name.clone(),
            source,
        })?;
        for param in path::params(&segments) {
            let bound = operation.parameters.iter().any(|parameter| {
                parameter.def.location == ParameterLocation::Path
                    && parameter.def.serialized_name() == param
            });
            if !bound {
                return Err(GenerateError::UnboundPathParameter {
                    operation: def.name.clone(),
                    path: def.path.clone(),
                    parameter: param.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if a client property needs a null check
    /// before each call.
    fn is_checked(&self, property: &ServiceClientProperty) -> bool {
        property.required && !property.read_only && self.types.types().is_nullable(property.ty)
    }

    fn exception(&mut self, qualified_name: &str) -> ClientTypeId {
        self.types
            .types_mut()
            .intern(ClientType::Class(ClassType::from_qualified_name(
                qualified_name,
            )))
    }
}

/// Formats a constant as a Java literal of the given type.
pub(crate) fn java_literal(value: &str, ty: &ClientType) -> String {
    match ty {
        ClientType::Primitive(
            PrimitiveType::Boolean | PrimitiveType::Int | PrimitiveType::Double,
        ) => value.to_owned(),
        ClientType::Primitive(PrimitiveType::Long) => format!("{value}L"),
        ClientType::Primitive(PrimitiveType::Float) => format!("{value}f"),
        ClientType::Enum(ty) => format!(
            "{}.{}({})",
            ty.name,
            ty.from_method,
            match ty.value_type {
                PrimitiveType::String => string_literal(value),
                _ => value.to_owned(),
            }
        ),
        _ => string_literal(value),
    }
}
