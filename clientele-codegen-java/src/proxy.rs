use clientele_core::{
    codegen::naming::string_literal,
    mapper::Known,
    model::{Proxy, ProxyMethod, ProxyParameter, ProxyParameterLocation, TypeRegistry},
    settings::{PipelineGeneration, Settings},
};
use itertools::Itertools;

use crate::{
    imports::Imports,
    runtime::Runtime,
    template::Template,
    ty::JavaType,
    writer::{JavaWriter, Javadoc},
};

/// Renders a proxy interface, nested inside the class that calls it.
///
/// The pipeline implements the interface at runtime, from the
/// annotations on each method.
#[derive(Clone, Copy, Debug)]
pub struct JavaProxy<'a> {
    types: &'a TypeRegistry,
    proxy: &'a Proxy,
    /// The package of the enclosing class.
    package: &'a str,
    generation: PipelineGeneration,
    runtime: Runtime,
}

impl<'a> JavaProxy<'a> {
    pub fn new(
        types: &'a TypeRegistry,
        proxy: &'a Proxy,
        package: &'a str,
        settings: &Settings,
    ) -> Self {
        Self {
            types,
            proxy,
            package,
            generation: settings.pipeline_generation(),
            runtime: Runtime::new(settings),
        }
    }

    fn write_factory(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let name = &self.proxy.name;
        let (package, pipeline) = Known::HttpPipeline.qualified(self.generation);
        imports
            .add(format!("{package}.{pipeline}"))
            .add("java.lang.reflect.InvocationTargetException");

        w.block(
            format!("static {name} getNewInstance({pipeline} pipeline)"),
            |w| {
                w.block_with(
                    "try",
                    "} catch (ClassNotFoundException | NoSuchMethodException | IllegalAccessException \
                    | InvocationTargetException e) {",
                    |w| {
                        w.line(format!(
                            "Class<?> clazz = Class.forName({});",
                            string_literal(&format!("{}.{name}Impl", self.package))
                        ));
                        w.line(format!(
                            "return ({name}) clazz.getMethod(\"getNewInstance\", {pipeline}.class)\
                            .invoke(null, pipeline);"
                        ));
                    },
                );
                w.indent(|w| {
                    w.line("throw new RuntimeException(e);");
                });
                w.line("}");
            },
        );
    }

    fn write_method(&self, w: &mut JavaWriter, imports: &mut Imports, method: &ProxyMethod) {
        let codes = method.expected_status_codes.iter().join(", ");
        if self.runtime.is_azure() {
            let verb = verb_annotation(method);
            imports
                .add(self.runtime.http_annotation(&verb))
                .add(self.runtime.http_annotation("ExpectedResponses"))
                .add(self.runtime.http_annotation("UnexpectedResponseExceptionType"));
            w.line(format!("@{verb}({})", string_literal(&method.path)));
            w.line(format!("@ExpectedResponses({{ {codes} }})"));
            for exception in &method.exceptions {
                imports.add_type(self.types, exception.ty);
                w.line(format!(
                    "@UnexpectedResponseExceptionType(value = {}.class, code = {{ {} }})",
                    JavaType::new(self.types, exception.ty),
                    exception.status_codes.iter().join(", ")
                ));
            }
            imports.add_type(self.types, method.default_exception);
            w.line(format!(
                "@UnexpectedResponseExceptionType({}.class)",
                JavaType::new(self.types, method.default_exception)
            ));
        } else {
            imports
                .add(self.runtime.http_annotation("HttpRequestInformation"))
                .add(self.runtime.http_annotation("UnexpectedResponseExceptionDetail"))
                .add("io.clientcore.core.http.models.HttpMethod");
            w.line(format!(
                "@HttpRequestInformation(method = HttpMethod.{}, path = {}, \
                expectedStatusCodes = {{ {codes} }})",
                method.http_method.as_str(),
                string_literal(&method.path)
            ));
            for exception in &method.exceptions {
                w.line(format!(
                    "@UnexpectedResponseExceptionDetail(statusCode = {{ {} }})",
                    exception.status_codes.iter().join(", ")
                ));
            }
            w.line("@UnexpectedResponseExceptionDetail");
        }

        imports.add_type(self.types, method.return_type);
        let parameters = method
            .parameters
            .iter()
            .map(|parameter| self.parameter(imports, parameter))
            .join(", ");
        w.line(format!(
            "{} {}({parameters});",
            JavaType::new(self.types, method.return_type),
            method.name
        ));
    }

    fn parameter(&self, imports: &mut Imports, parameter: &ProxyParameter) -> String {
        imports.add_type(self.types, parameter.ty);
        let ty = JavaType::new(self.types, parameter.ty);
        let (annotation, value) = match &parameter.location {
            ProxyParameterLocation::Host => ("HostParam", &parameter.serialized_name),
            ProxyParameterLocation::Path => ("PathParam", &parameter.serialized_name),
            ProxyParameterLocation::Query => ("QueryParam", &parameter.serialized_name),
            ProxyParameterLocation::Header => ("HeaderParam", &parameter.serialized_name),
            ProxyParameterLocation::Body { content_type } => ("BodyParam", content_type),
            ProxyParameterLocation::Context => {
                return format!("{ty} {}", parameter.name);
            }
        };
        imports.add(self.runtime.http_annotation(annotation));
        format!(
            "@{annotation}({}) {ty} {}",
            string_literal(value),
            parameter.name
        )
    }
}

impl Template for JavaProxy<'_> {
    fn write(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let proxy = self.proxy;
        imports.add(self.runtime.annotation("ServiceInterface"));

        w.javadoc(&Javadoc::new(format!(
            "The interface defining all the services for {} to be used by the proxy service to \
            perform REST calls.",
            proxy.service_name
        )));
        if self.runtime.is_azure() {
            imports.add(self.runtime.http_annotation("Host"));
            w.line(format!("@Host({})", string_literal(&proxy.base_url)));
            w.line(format!(
                "@ServiceInterface(name = {})",
                string_literal(&proxy.service_name)
            ));
        } else {
            w.line(format!(
                "@ServiceInterface(name = {}, host = {})",
                string_literal(&proxy.service_name),
                string_literal(&proxy.base_url)
            ));
        }
        w.block(format!("public interface {}", proxy.name), |w| {
            let mut first = true;
            if !self.runtime.is_azure() {
                self.write_factory(w, imports);
                first = false;
            }
            for method in &proxy.methods {
                if !first {
                    w.blank();
                }
                first = false;
                self.write_method(w, imports, method);
            }
        });
    }
}

/// Returns the annotation for an HTTP method, like `Get`.
fn verb_annotation(method: &ProxyMethod) -> String {
    let verb = method.http_method.as_str();
    let mut chars = verb.chars();
    match chars.next() {
        Some(first) => first.to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}
