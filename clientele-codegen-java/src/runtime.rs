use clientele_core::settings::{PipelineGeneration, Settings};

/// The runtime library classes that generated code uses, which differ
/// between pipeline generations.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Runtime {
    generation: PipelineGeneration,
}

impl Runtime {
    pub fn new(settings: &Settings) -> Self {
        Self {
            generation: settings.pipeline_generation(),
        }
    }

    #[inline]
    pub fn is_azure(self) -> bool {
        self.generation.is_azure()
    }

    /// Returns `true` if models and enums carry Jackson annotations.
    #[inline]
    pub fn uses_jackson(self) -> bool {
        self.is_azure()
    }

    /// Returns the qualified name of a proxy annotation, like `Host`
    /// or `PathParam`.
    pub fn http_annotation(self, name: &str) -> String {
        if self.is_azure() {
            format!("com.azure.core.annotation.{name}")
        } else {
            format!("io.clientcore.core.http.annotations.{name}")
        }
    }

    /// Returns the qualified name of a general annotation, like
    /// `ServiceInterface` or `ServiceMethod`.
    pub fn annotation(self, name: &str) -> String {
        if self.is_azure() {
            format!("com.azure.core.annotation.{name}")
        } else {
            format!("io.clientcore.core.annotations.{name}")
        }
    }

    pub fn client_logger(self) -> &'static str {
        if self.is_azure() {
            "com.azure.core.util.logging.ClientLogger"
        } else {
            "io.clientcore.core.instrumentation.logging.ClientLogger"
        }
    }

    /// Returns the Java expression for an empty per-call context.
    pub fn empty_context(self) -> &'static str {
        if self.is_azure() {
            "Context.NONE"
        } else {
            "RequestContext.none()"
        }
    }

    /// Returns the statement that throws a validation error
    /// for `expression`.
    pub fn throw_invalid_argument(self, expression: &str, logger: bool) -> String {
        let message = format!("\"Parameter {expression} is required and cannot be null.\"");
        match (logger, self.is_azure()) {
            (true, true) => {
                format!("throw LOGGER.atError().log(new IllegalArgumentException({message}));")
            }
            (true, false) => format!(
                "throw LOGGER.throwableAtError().log({message}, IllegalArgumentException::new);"
            ),
            (false, _) => format!("throw new IllegalArgumentException({message});"),
        }
    }
}
