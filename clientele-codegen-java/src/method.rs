use clientele_core::{
    mapper::Known,
    model::{ClientMethod, ClientMethodKind, TypeRegistry},
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

/// Renders one variant of an operation, as a method of a service client
/// or method group.
#[derive(Clone, Copy, Debug)]
pub struct JavaClientMethod<'a> {
    types: &'a TypeRegistry,
    method: &'a ClientMethod,
    generation: PipelineGeneration,
    runtime: Runtime,
    /// Whether validation errors are logged through the class's
    /// `LOGGER` before they're thrown.
    logger: bool,
}

impl<'a> JavaClientMethod<'a> {
    pub fn new(types: &'a TypeRegistry, method: &'a ClientMethod, settings: &Settings) -> Self {
        Self {
            types,
            method,
            generation: settings.pipeline_generation(),
            runtime: Runtime::new(settings),
            logger: settings.use_client_logger(),
        }
    }

    /// Returns `true` if the method throws validation errors
    /// through a `LOGGER`.
    pub fn uses_logger(&self) -> bool {
        self.logger && !self.method.kind.is_async() && !self.method.validations.is_empty()
    }

    fn javadoc(&self, imports: &mut Imports) -> Javadoc {
        let method = self.method;
        let mut doc = Javadoc::new(&method.description);
        for parameter in &method.parameters {
            doc = doc.param(&parameter.name, &parameter.description);
        }
        for throws in &method.throws {
            imports.add_type(self.types, throws.ty);
            doc = doc.throws(
                &JavaType::new(self.types, throws.ty).to_string(),
                &throws.description,
            );
        }
        match return_description(method.kind, self.types.is_void(method.value_type)) {
            Some(description) => doc.returns(description),
            None => doc,
        }
    }

    fn write_validations(&self, w: &mut JavaWriter) {
        for check in &self.method.validations {
            let expression = &check.expression;
            w.block(format!("if ({expression} == null)"), |w| {
                if self.method.kind.is_async() {
                    w.line(format!(
                        "return Mono.error(new IllegalArgumentException(\
                        \"Parameter {expression} is required and cannot be null.\"));"
                    ));
                } else {
                    w.line(
                        self.runtime
                            .throw_invalid_argument(expression, self.logger),
                    );
                }
            });
        }
    }

    fn write_call(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let method = self.method;
        let void = self.types.is_void(method.value_type);
        let proxy = method.proxy_method.as_deref().unwrap_or(&method.name);
        let delegate = method.delegate.as_deref().unwrap_or(&method.name);
        let names = method
            .parameters
            .iter()
            .map(|parameter| parameter.name.as_str());

        match method.kind {
            ClientMethodKind::WithResponseAsync => {
                imports.add("com.azure.core.util.FluxUtil");
                let arguments = method
                    .proxy_arguments
                    .iter()
                    .map(String::as_str)
                    .chain(["context"])
                    .join(", ");
                w.line(format!(
                    "return FluxUtil.withContext(context -> service.{proxy}({arguments}));"
                ));
            }
            ClientMethodKind::ValueAsync => {
                let then = if void {
                    "ignored -> Mono.empty()"
                } else {
                    "res -> Mono.justOrEmpty(res.getValue())"
                };
                w.line(format!(
                    "return {delegate}({}).flatMap({then});",
                    names.format(", ")
                ));
            }
            ClientMethodKind::WithResponseSync => {
                // The context is the last parameter.
                let context = method
                    .parameters
                    .last()
                    .map(|parameter| parameter.name.as_str());
                let arguments = method
                    .proxy_arguments
                    .iter()
                    .map(String::as_str)
                    .chain(context)
                    .join(", ");
                w.line(format!("return service.{proxy}({arguments});"));
            }
            ClientMethodKind::ValueSync => {
                let arguments = names.chain([self.runtime.empty_context()]).join(", ");
                if void {
                    w.line(format!("{delegate}({arguments});"));
                } else {
                    w.line(format!("return {delegate}({arguments}).getValue();"));
                }
            }
        }
    }
}

impl Template for JavaClientMethod<'_> {
    fn write(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let method = self.method;
        imports
            .add(self.runtime.annotation("ServiceMethod"))
            .add(self.runtime.annotation("ReturnType"))
            .add_type(self.types, method.return_type);
        if method.kind == ClientMethodKind::ValueSync {
            // For `Context.NONE` or `RequestContext.none()`.
            let (package, name) = Known::Context.qualified(self.generation);
            imports.add(format!("{package}.{name}"));
        }

        w.javadoc(&self.javadoc(imports));
        w.line("@ServiceMethod(returns = ReturnType.SINGLE)");
        let parameters = method
            .parameters
            .iter()
            .map(|parameter| {
                imports.add_type(self.types, parameter.ty);
                format!(
                    "{} {}",
                    JavaType::new(self.types, parameter.ty).optional(parameter.required),
                    parameter.name
                )
            })
            .join(", ");
        w.block(
            format!(
                "{}{} {}({parameters})",
                method.visibility.modifier(),
                JavaType::new(self.types, method.return_type),
                method.name
            ),
            |w| {
                self.write_validations(w);
                for local in &method.locals {
                    imports.add_type(self.types, local.ty);
                    w.line(format!(
                        "final {} {} = {};",
                        JavaType::new(self.types, local.ty),
                        local.name,
                        local.value
                    ));
                }
                self.write_call(w, imports);
            },
        );
    }
}

/// Writes each method, preceded by a blank line. Returns `true` if any
/// method needs the class to declare a `LOGGER`.
pub(crate) fn write_methods(
    w: &mut JavaWriter,
    imports: &mut Imports,
    types: &TypeRegistry,
    methods: &[ClientMethod],
    settings: &Settings,
) -> bool {
    let mut logger = false;
    for method in methods {
        let template = JavaClientMethod::new(types, method, settings);
        logger |= template.uses_logger();
        w.blank();
        template.write(w, imports);
    }
    logger
}

/// Writes the static `LOGGER` for a class.
pub(crate) fn write_logger(w: &mut JavaWriter, imports: &mut Imports, settings: &Settings, class: &str) {
    let runtime = Runtime::new(settings);
    imports.add(runtime.client_logger());
    w.blank();
    w.line(format!(
        "private static final ClientLogger LOGGER = new ClientLogger({class}.class);"
    ));
}

/// Returns the `@return` text for a variant.
fn return_description(kind: ClientMethodKind, void: bool) -> Option<&'static str> {
    Some(match (kind, void) {
        (ClientMethodKind::WithResponseAsync, false) => {
            "the response body along with {@link Response} on successful completion of {@link Mono}."
        }
        (ClientMethodKind::WithResponseAsync, true) => {
            "the {@link Response} on successful completion of {@link Mono}."
        }
        (ClientMethodKind::ValueAsync, false) => {
            "the response body on successful completion of {@link Mono}."
        }
        (ClientMethodKind::ValueAsync, true) => {
            "A {@link Mono} that completes when a successful response is received."
        }
        (ClientMethodKind::WithResponseSync, false) => {
            "the response body along with {@link Response}."
        }
        (ClientMethodKind::WithResponseSync, true) => "the {@link Response}.",
        (ClientMethodKind::ValueSync, false) => "the response.",
        (ClientMethodKind::ValueSync, true) => return None,
    })
}
