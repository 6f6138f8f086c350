use clientele_core::{
    codegen::naming::getter_name,
    model::{
        Argument, ClientAccessorMethod, ClientModel, Constructor, ConstructorBody, ServiceClient,
    },
    settings::Settings,
};
use itertools::Itertools;

use crate::{
    extension::TemplateExtensions,
    imports::Imports,
    method::{write_logger, write_methods},
    proxy::JavaProxy,
    runtime::Runtime,
    template::Template,
    ty::JavaType,
    writer::{JavaWriter, Javadoc},
};

/// Renders a service client class: its constructors, properties,
/// method groups, operations, and sub-client accessors, in that order.
#[derive(Clone, Copy, Debug)]
pub struct JavaServiceClient<'a> {
    model: &'a ClientModel,
    client: &'a ServiceClient,
    settings: &'a Settings,
    runtime: Runtime,
    extensions: Option<&'a TemplateExtensions>,
}

impl<'a> JavaServiceClient<'a> {
    pub fn new(model: &'a ClientModel, client: &'a ServiceClient, settings: &'a Settings) -> Self {
        Self {
            model,
            client,
            settings,
            runtime: Runtime::new(settings),
            extensions: None,
        }
    }

    pub fn with_extensions(self, extensions: Option<&'a TemplateExtensions>) -> Self {
        Self { extensions, ..self }
    }

    fn write_properties(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let types = &self.model.types;
        for property in &self.client.properties {
            imports.add_type(types, property.ty);
            let ty = JavaType::new(types, property.ty).optional(property.required);
            w.blank();
            w.javadoc(&Javadoc::new(&property.description));
            w.line(format!("private final {ty} {};", property.name));
            w.blank();
            w.javadoc(
                &Javadoc::new(format!("Gets {}", property.description))
                    .returns(format!("the {} value.", property.name)),
            );
            w.block(format!("public {ty} {}()", property.getter_name()), |w| {
                w.line(format!("return this.{};", property.name));
            });
        }
    }

    fn write_method_groups(&self, w: &mut JavaWriter) {
        for group in &self.client.method_groups {
            let class = &group.class_name;
            w.blank();
            w.javadoc(&Javadoc::new(format!(
                "The {class} object to access its operations."
            )));
            w.line(format!("private final {class} {};", group.variable_name));
            w.blank();
            w.javadoc(
                &Javadoc::new(format!("Gets the {class} object to access its operations."))
                    .returns(format!("the {class} object.")),
            );
            w.block(
                format!("public {class} {}()", getter_name(&group.variable_name)),
                |w| {
                    w.line(format!("return this.{};", group.variable_name));
                },
            );
        }
    }

    fn write_constructor(
        &self,
        w: &mut JavaWriter,
        imports: &mut Imports,
        constructor: &Constructor,
    ) {
        let types = &self.model.types;
        let client = self.client;
        let name = &client.class_name;

        let mut doc = Javadoc::new(format!("Initializes an instance of {name} client."));
        for parameter in &constructor.parameters {
            doc = doc.param(&parameter.name, &parameter.description);
        }
        w.javadoc(&doc);
        let parameters = constructor
            .parameters
            .iter()
            .map(|parameter| {
                imports.add_type(types, parameter.ty);
                format!(
                    "{} {}",
                    JavaType::new(types, parameter.ty).optional(parameter.required),
                    parameter.name
                )
            })
            .join(", ");
        w.block(
            format!("{}{name}({parameters})", constructor.visibility.modifier()),
            |w| match &constructor.body {
                ConstructorBody::Delegate(arguments) => {
                    let arguments = arguments
                        .iter()
                        .map(|argument| self.argument(imports, argument))
                        .join(", ");
                    w.line(format!("this({arguments});"));
                }
                ConstructorBody::Initialize => self.write_initialize(w, imports, constructor),
            },
        );
    }

    fn write_initialize(&self, w: &mut JavaWriter, imports: &mut Imports, constructor: &Constructor) {
        let client = self.client;
        for parameter in &constructor.parameters {
            w.line(format!("this.{0} = {0};", parameter.name));
        }
        for property in &client.properties {
            if let Some(value) = &property.default_value {
                w.line(format!("this.{} = {value};", property.name));
            }
        }
        for group in &client.method_groups {
            w.line(format!(
                "this.{} = new {}(this);",
                group.variable_name, group.class_name
            ));
        }
        let Some(proxy) = &client.proxy else {
            return;
        };
        if self.runtime.is_azure() {
            imports.add("com.azure.core.http.rest.RestProxy");
            let has_serializer = client
                .properties
                .iter()
                .any(|property| property.name == "serializerAdapter");
            let serializer = if has_serializer {
                ", this.serializerAdapter"
            } else {
                ""
            };
            w.line(format!(
                "this.service = RestProxy.create({}.class, this.httpPipeline{serializer});",
                proxy.name
            ));
        } else {
            w.line(format!(
                "this.service = {}.getNewInstance(this.httpPipeline);",
                proxy.name
            ));
        }
    }

    fn argument(&self, imports: &mut Imports, argument: &Argument) -> String {
        match argument {
            Argument::Forward(name) => name.clone(),
            Argument::DefaultPipeline => {
                imports
                    .add("com.azure.core.http.HttpPipelineBuilder")
                    .add("com.azure.core.http.policy.RetryPolicy")
                    .add("com.azure.core.http.policy.UserAgentPolicy");
                "new HttpPipelineBuilder().policies(new UserAgentPolicy(), new RetryPolicy()).build()"
                    .to_owned()
            }
            Argument::DefaultSerializer => {
                imports.add("com.azure.core.util.serializer.JacksonAdapter");
                "JacksonAdapter.createDefaultSerializerAdapter()".to_owned()
            }
        }
    }

    /// Writes a sub-client accessor. Returns `true` if it throws
    /// validation errors through the `LOGGER`.
    fn write_accessor(
        &self,
        w: &mut JavaWriter,
        imports: &mut Imports,
        accessor: &ClientAccessorMethod,
    ) -> bool {
        let types = &self.model.types;
        let child = self.model.client(accessor.sub_client);
        let class = &child.class_name;
        imports.add(format!("{}.{class}", child.package));

        let mut doc = Javadoc::new(format!("Gets an instance of {class} class."));
        for parameter in &accessor.parameters {
            doc = doc.param(&parameter.name, &parameter.description);
        }
        w.javadoc(&doc.returns(format!("an instance of {class} class.")));

        let parameters = accessor
            .parameters
            .iter()
            .map(|parameter| {
                imports.add_type(types, parameter.ty);
                format!(
                    "{} {}",
                    JavaType::new(types, parameter.ty).optional(parameter.required),
                    parameter.name
                )
            })
            .join(", ");
        let logger = self.settings.use_client_logger();
        w.block(format!("public {class} {}({parameters})", accessor.name), |w| {
            for check in &accessor.validations {
                w.block(format!("if ({} == null)", check.expression), |w| {
                    w.line(
                        self.runtime
                            .throw_invalid_argument(&check.expression, logger),
                    );
                });
            }
            // The parent's own values come first, then the
            // caller's arguments.
            let inherited = accessor.arguments.len() - accessor.parameters.len();
            let arguments = accessor
                .arguments
                .iter()
                .enumerate()
                .map(|(index, argument)| {
                    if index < inherited {
                        format!("this.{argument}")
                    } else {
                        argument.clone()
                    }
                })
                .join(", ");
            w.line(format!("return new {class}({arguments});"));
        });
        logger && !accessor.validations.is_empty()
    }
}

impl Template for JavaServiceClient<'_> {
    fn write(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let client = self.client;
        let name = &client.class_name;

        w.javadoc(&Javadoc::new(&client.description));
        w.block(format!("public final class {name}"), |w| {
            for (index, constructor) in client.constructors.iter().enumerate() {
                if index > 0 {
                    w.blank();
                }
                self.write_constructor(w, imports, constructor);
            }
            self.write_properties(w, imports);
            self.write_method_groups(w);

            let mut logger = false;
            if let Some(proxy) = &client.proxy {
                w.blank();
                w.javadoc(&Javadoc::new("The proxy service used to perform REST calls."));
                w.line(format!("private final {} service;", proxy.name));
                w.blank();
                JavaProxy::new(&self.model.types, proxy, &client.package, self.settings)
                    .write(w, imports);
                logger |= write_methods(
                    w,
                    imports,
                    &self.model.types,
                    &client.client_methods,
                    self.settings,
                );
            }
            for accessor in &client.accessors {
                w.blank();
                logger |= self.write_accessor(w, imports, accessor);
            }
            if let Some(extensions) = self.extensions {
                extensions.write(w, imports);
            }
            if logger {
                write_logger(w, imports, self.settings, name);
            }
        });
    }
}
