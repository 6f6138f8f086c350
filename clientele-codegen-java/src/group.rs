use clientele_core::{
    model::{MethodGroupClient, ServiceClient, TypeRegistry},
    settings::Settings,
};

use crate::{
    extension::TemplateExtensions,
    imports::Imports,
    method::{write_logger, write_methods},
    proxy::JavaProxy,
    runtime::Runtime,
    template::Template,
    writer::{JavaWriter, Javadoc},
};

/// Renders the class for an operation group. The service client
/// creates one instance, and passes itself to the constructor.
#[derive(Clone, Copy, Debug)]
pub struct JavaMethodGroup<'a> {
    types: &'a TypeRegistry,
    group: &'a MethodGroupClient,
    client: &'a ServiceClient,
    settings: &'a Settings,
    extensions: Option<&'a TemplateExtensions>,
}

impl<'a> JavaMethodGroup<'a> {
    pub fn new(
        types: &'a TypeRegistry,
        group: &'a MethodGroupClient,
        client: &'a ServiceClient,
        settings: &'a Settings,
    ) -> Self {
        Self {
            types,
            group,
            client,
            settings,
            extensions: None,
        }
    }

    pub fn with_extensions(self, extensions: Option<&'a TemplateExtensions>) -> Self {
        Self { extensions, ..self }
    }
}

impl Template for JavaMethodGroup<'_> {
    fn write(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let group = self.group;
        let client = self.client;
        let runtime = Runtime::new(self.settings);
        let name = &group.class_name;
        let service = &group.proxy.name;
        imports.add(format!("{}.{}", client.package, client.class_name));

        w.javadoc(&Javadoc::new(&group.description));
        w.block(format!("public final class {name}"), |w| {
            w.javadoc(&Javadoc::new("The proxy service used to perform REST calls."));
            w.line(format!("private final {service} service;"));
            w.blank();
            w.javadoc(&Javadoc::new(
                "The service client containing this operation class.",
            ));
            w.line(format!("private final {} client;", client.class_name));
            w.blank();

            w.javadoc(
                &Javadoc::new(format!("Initializes an instance of {name}."))
                    .param(
                        "client",
                        "the instance of the service client containing this operation class.",
                    ),
            );
            w.block(format!("{name}({} client)", client.class_name), |w| {
                if runtime.is_azure() {
                    imports.add("com.azure.core.http.rest.RestProxy");
                    let has_serializer = client
                        .properties
                        .iter()
                        .any(|property| property.name == "serializerAdapter");
                    let serializer = if has_serializer {
                        ", client.getSerializerAdapter()"
                    } else {
                        ""
                    };
                    w.line(format!(
                        "this.service = RestProxy.create({service}.class, \
                        client.getHttpPipeline(){serializer});"
                    ));
                } else {
                    w.line(format!(
                        "this.service = {service}.getNewInstance(client.getHttpPipeline());"
                    ));
                }
                w.line("this.client = client;");
            });

            w.blank();
            JavaProxy::new(self.types, &group.proxy, &group.package, self.settings)
                .write(w, imports);

            let logger = write_methods(
                w,
                imports,
                self.types,
                &group.client_methods,
                self.settings,
            );
            if let Some(extensions) = self.extensions {
                extensions.write(w, imports);
            }
            if logger {
                write_logger(w, imports, self.settings, name);
            }
        });
    }
}
