use indexmap::IndexMap;
use petgraph::{algo::toposort, graph::DiGraph};
use tracing::debug;

use super::{
    describe,
    known::Known,
    method::{OperationMapper, OperationMethods, java_literal},
    type_::TypeMapper,
};
use crate::{
    codegen::{
        NameScope,
        naming::{class_name, getter_name, variable_name},
    },
    error::{ConfigurationError, GenerateError},
    ir::{ApiSpec, RawClient, RawClientParameter},
    model::{
        Argument, ClientAccessorMethod, ClientIndex, ClientModel, Constructor, ConstructorBody,
        MethodGroupClient, Parameter, PropertyKind, Proxy, RequiredCheck, ServiceClient,
        ServiceClientProperty, TypeRegistry, Visibility,
    },
    parse::ParameterLocation,
    settings::{PipelineGeneration, Settings},
};

/// Builds the service clients, their method groups, and their
/// sub-client accessors.
#[derive(Debug)]
pub struct ClientModelBuilder<'a> {
    spec: &'a ApiSpec<'a>,
    settings: &'a Settings,
    types: TypeMapper<'a>,
}

impl<'a> ClientModelBuilder<'a> {
    pub fn new(spec: &'a ApiSpec<'a>, settings: &'a Settings, types: TypeMapper<'a>) -> Self {
        Self {
            spec,
            settings,
            types,
        }
    }

    /// Builds every client, parents before children.
    pub fn build(mut self) -> Result<ClientModel, GenerateError> {
        let order = self.client_order()?;
        let mut clients: Vec<ServiceClient> = Vec::with_capacity(order.len());
        let mut indices: IndexMap<&str, ClientIndex> = IndexMap::new();
        for raw in order {
            let parent = match raw.def.parent.as_deref() {
                Some(parent) => indices.get(parent).copied(),
                None => None,
            };
            let client = self.client(raw, parent.map(|index| (index, &clients[index.0])))?;
            let index = ClientIndex(clients.len());
            if let Some(parent) = parent {
                clients[parent.0].children.push(index);
            }
            indices.insert(&raw.def.name, index);
            clients.push(client);
        }

        // Accessors need the sub-client's constructors, so they're
        // added after every client is built.
        for index in 0..clients.len() {
            let Some(parent) = clients[index].parent else {
                continue;
            };
            let mut accessor = accessor(
                self.types.types(),
                &clients[parent.0],
                &clients[index],
                ClientIndex(index),
            );
            let name = method_names(&clients[parent.0])
                .uniquify(&accessor.name)
                .into_owned();
            accessor.name = name;
            clients[parent.0].accessors.push(accessor);
        }

        debug!(clients = clients.len(), "Built client model");
        Ok(ClientModel {
            title: self.spec.info.title.clone(),
            types: self.types.into_types(),
            clients,
        })
    }

    /// Orders the clients so that parents come before their children,
    /// keeping the declaration order otherwise.
    fn client_order(&self) -> Result<Vec<&'a RawClient<'a>>, GenerateError> {
        let spec = self.spec;
        let mut graph = DiGraph::<usize, ()>::new();
        let mut nodes = IndexMap::new();
        for (index, client) in spec.clients.iter().enumerate() {
            let node = graph.add_node(index);
            if nodes.insert(client.def.name.as_str(), node).is_some() {
                return Err(ConfigurationError::DuplicateClient(client.def.name.clone()).into());
            }
        }
        for client in &spec.clients {
            let Some(parent) = client.def.parent.as_deref() else {
                continue;
            };
            let Some(&from) = nodes.get(parent) else {
                return Err(ConfigurationError::UnknownParentClient {
                    client: client.def.name.clone(),
                    parent: parent.to_owned(),
                }
                .into());
            };
            graph.add_edge(from, nodes[client.def.name.as_str()], ());
        }
        let order = toposort(&graph, None).map_err(|cycle| {
            ConfigurationError::CyclicClientParent(
                spec.clients[graph[cycle.node_id()]].def.name.clone(),
            )
        })?;
        let mut order: Vec<usize> = order.into_iter().map(|node| graph[node]).collect();
        // `toposort` doesn't promise declaration order for unrelated
        // clients, so sort by depth, then position.
        let depth = |mut index: usize| {
            let mut depth = 0;
            while let Some(parent) = spec.clients[index].def.parent.as_deref()
                && let Some(&node) = nodes.get(parent)
            {
                index = graph[node];
                depth += 1;
            }
            depth
        };
        order.sort_by_key(|&index| (depth(index), index));
        Ok(order.into_iter().map(|index| &spec.clients[index]).collect())
    }

    fn client(
        &mut self,
        raw: &RawClient<'a>,
        parent: Option<(ClientIndex, &ServiceClient)>,
    ) -> Result<ServiceClient, GenerateError> {
        let settings = self.settings;
        let name = class_name(&raw.def.name);
        let package = settings.package(&[settings.implementation_subpackage()]);
        let client_class = self.types.names_mut().uniquify(
            &package,
            &if name.ends_with("Client") {
                name.clone()
            } else {
                format!("{name}Client")
            },
        );

        let mut properties = self.pipeline_properties();
        if let Some((_, parent)) = parent {
            properties.extend(
                parent
                    .properties
                    .iter()
                    .filter(|property| matches!(property.kind, PropertyKind::Parameter { .. }))
                    .map(|property| ServiceClientProperty {
                        inherited: true,
                        ..property.clone()
                    }),
            );
        }
        for parameter in &raw.parameters {
            let name = variable_name(&parameter.def.name);
            match properties.iter().find(|property| property.name == name) {
                None => {
                    let property = self.client_property(name, parameter)?;
                    properties.push(property);
                }
                // Redeclaring a parameter of the parent client refers
                // to the same parameter.
                Some(property)
                    if property.inherited
                        && property.kind
                            == (PropertyKind::Parameter {
                                location: parameter.def.location,
                            }) => {}
                Some(property) if property.kind == PropertyKind::PipelineHandle => {
                    return Err(ConfigurationError::ReservedClientParameter {
                        client: raw.def.name.clone(),
                        parameter: parameter.def.name.clone(),
                    }
                    .into());
                }
                Some(_) => {
                    return Err(ConfigurationError::DuplicateClientParameter {
                        client: raw.def.name.clone(),
                        parameter: parameter.def.name.clone(),
                    }
                    .into());
                }
            }
        }

        let has_operations = raw.groups.iter().any(|group| !group.operations.is_empty());
        let endpoint = properties.iter().find(|property| {
            matches!(
                property.kind,
                PropertyKind::Parameter {
                    location: ParameterLocation::Host
                }
            )
        });
        let base_url = match endpoint {
            Some(endpoint) => format!("{{{}}}", endpoint.name),
            None if has_operations => {
                return Err(ConfigurationError::MissingEndpoint(raw.def.name.clone()).into());
            }
            None => String::new(),
        };

        let mut proxy = None;
        let mut client_methods = Vec::new();
        let mut method_groups = Vec::new();
        for group in &raw.groups {
            if group.is_root() {
                let OperationMethods {
                    proxy_methods,
                    client_methods: methods,
                } = OperationMapper::new(&mut self.types, &raw.def.name, &properties, "this")
                    .map_all(&group.operations)?;
                if proxy.is_none() {
                    proxy = Some(Proxy {
                        name: self
                            .types
                            .names_mut()
                            .uniquify(&package, &format!("{client_class}Service")),
                        service_name: client_class.clone(),
                        base_url: base_url.clone(),
                        methods: Vec::new(),
                    });
                }
                if let Some(proxy) = &mut proxy {
                    proxy.methods.extend(proxy_methods);
                }
                client_methods.extend(methods);
                continue;
            }

            let group_name = class_name(&group.def.name);
            let OperationMethods {
                proxy_methods,
                client_methods: methods,
            } = OperationMapper::new(&mut self.types, &raw.def.name, &properties, "this.client")
                .map_all(&group.operations)?;
            let group_class = self.types.names_mut().uniquify(
                &package,
                &if settings.is_fluent() {
                    format!("{group_name}ClientImpl")
                } else {
                    format!("{group_name}Impl")
                },
            );
            method_groups.push(MethodGroupClient {
                class_name: group_class,
                package: package.clone(),
                variable_name: variable_name(&group.def.name),
                description: group.def.description.clone().unwrap_or_else(|| {
                    format!(
                        "An instance of this class provides access to all the operations \
                        defined in {group_name}."
                    )
                }),
                proxy: Proxy {
                    // Proxies are looked up by name within the package.
                    name: self
                        .types
                        .names_mut()
                        .uniquify(&package, &format!("{group_name}Service")),
                    service_name: format!("{client_class}{group_name}"),
                    base_url: base_url.clone(),
                    methods: proxy_methods,
                },
                client_methods: methods,
                name: group_name,
            });
        }

        let constructors = self.constructors(&properties);
        debug!(
            client = %client_class,
            properties = properties.len(),
            method_groups = method_groups.len(),
            "Built client"
        );
        Ok(ServiceClient {
            description: describe(None, raw.def.description.as_deref())
                .unwrap_or_else(|| format!("Initializes a new instance of the {client_class} type.")),
            name,
            class_name: client_class,
            package,
            parent: parent.map(|(index, _)| index),
            children: Vec::new(),
            properties,
            constructors,
            method_groups,
            proxy,
            client_methods,
            accessors: Vec::new(),
        })
    }

    /// Returns the properties for the runtime objects that the
    /// client needs.
    fn pipeline_properties(&mut self) -> Vec<ServiceClientProperty> {
        let settings = self.settings;
        let generation = settings.pipeline_generation();
        let mut handles = vec![(
            "httpPipeline",
            Known::HttpPipeline,
            "The HTTP pipeline to send requests through.",
        )];
        match generation {
            PipelineGeneration::AzureV1 | PipelineGeneration::AzureV2 if settings.is_fluent() => {
                handles.extend([
                    (
                        "serializerAdapter",
                        Known::SerializerAdapter,
                        "The serializer to serialize an object into a string.",
                    ),
                    (
                        "defaultPollInterval",
                        Known::Duration,
                        "The default poll interval for long-running operation.",
                    ),
                ]);
            }
            PipelineGeneration::AzureV1 => handles.push((
                "serializerAdapter",
                Known::SerializerAdapter,
                "The serializer to serialize an object into a string.",
            )),
            PipelineGeneration::AzureV2 => {}
            PipelineGeneration::ClientCore => handles.push((
                "instrumentation",
                Known::Instrumentation,
                "The instance of instrumentation to report telemetry.",
            )),
        }
        handles
            .into_iter()
            .map(|(name, known, description)| ServiceClientProperty {
                name: name.to_owned(),
                ty: self.types.known(known),
                description: description.to_owned(),
                read_only: true,
                required: true,
                default_value: None,
                kind: PropertyKind::PipelineHandle,
                inherited: false,
            })
            .collect()
    }

    fn client_property(
        &mut self,
        name: String,
        parameter: &RawClientParameter<'a>,
    ) -> Result<ServiceClientProperty, GenerateError> {
        let ty = self.types.resolve(parameter.schema)?;
        let default_value = parameter
            .def
            .constant
            .as_deref()
            .map(|constant| java_literal(constant, self.types.types().get(ty)));
        Ok(ServiceClientProperty {
            description: parameter
                .def
                .description
                .clone()
                .unwrap_or_else(|| format!("The {name} parameter.")),
            ty,
            read_only: default_value.is_some(),
            required: parameter.def.required,
            default_value,
            kind: PropertyKind::Parameter {
                location: parameter.def.location,
            },
            inherited: false,
            name,
        })
    }

    /// Returns the constructor overloads, from fewest to
    /// most parameters.
    fn constructors(&self, properties: &[ServiceClientProperty]) -> Vec<Constructor> {
        let handles: Vec<Parameter> = properties
            .iter()
            .filter(|property| property.kind == PropertyKind::PipelineHandle)
            .map(ServiceClientProperty::to_parameter)
            .collect();
        let mutable: Vec<Parameter> = properties
            .iter()
            .filter(|property| matches!(property.kind, PropertyKind::Parameter { .. }))
            .filter(|property| !property.read_only)
            .map(ServiceClientProperty::to_parameter)
            .collect();
        let maximal = Constructor {
            visibility: Visibility::Public,
            parameters: handles.iter().chain(&mutable).cloned().collect(),
            body: ConstructorBody::Initialize,
        };

        let legacy = self.settings.pipeline_generation() == PipelineGeneration::AzureV1
            && !self.settings.is_fluent();
        let Some(pipeline) = handles.first().filter(|_| legacy) else {
            return vec![maximal];
        };
        let forward = || {
            mutable
                .iter()
                .map(|parameter| Argument::Forward(parameter.name.clone()))
        };
        vec![
            Constructor {
                visibility: Visibility::Public,
                parameters: mutable.clone(),
                body: ConstructorBody::Delegate(
                    std::iter::once(Argument::DefaultPipeline)
                        .chain(forward())
                        .collect(),
                ),
            },
            Constructor {
                visibility: Visibility::Public,
                parameters: std::iter::once(pipeline.clone())
                    .chain(mutable.iter().cloned())
                    .collect(),
                body: ConstructorBody::Delegate(
                    [
                        Argument::Forward(pipeline.name.clone()),
                        Argument::DefaultSerializer,
                    ]
                    .into_iter()
                    .chain(forward())
                    .collect(),
                ),
            },
            maximal,
        ]
    }
}

/// Returns the names of the getters and accessors that `client`
/// already has.
fn method_names(client: &ServiceClient) -> NameScope {
    NameScope::with_reserved(
        client
            .properties
            .iter()
            .map(ServiceClientProperty::getter_name)
            .chain(
                client
                    .method_groups
                    .iter()
                    .map(|group| getter_name(&group.variable_name)),
            )
            .chain(client.accessors.iter().map(|accessor| accessor.name.clone())),
    )
}

/// Builds the method on `parent` that creates `child`.
fn accessor(
    types: &TypeRegistry,
    parent: &ServiceClient,
    child: &ServiceClient,
    index: ClientIndex,
) -> ClientAccessorMethod {
    let parameters: Vec<Parameter> = child
        .mutable_properties()
        .filter(|property| !property.inherited)
        .map(ServiceClientProperty::to_parameter)
        .collect();
    let arguments = parent
        .max_constructor()
        .into_iter()
        .flat_map(|constructor| &constructor.parameters)
        .chain(&parameters)
        .map(|parameter| parameter.name.clone())
        .collect();
    let validations = parameters
        .iter()
        .filter(|parameter| parameter.required && types.is_nullable(parameter.ty))
        .map(|parameter| RequiredCheck {
            expression: parameter.name.clone(),
        })
        .collect();
    ClientAccessorMethod {
        name: getter_name(&child.name),
        sub_client: index,
        parameters,
        arguments,
        validations,
    }
}
