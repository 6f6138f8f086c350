use crate::{
    model::{ClientTypeId, TypeRegistry},
    settings::PipelineGeneration,
};

/// A library class that generated code refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Known {
    HttpPipeline,
    SerializerAdapter,
    Instrumentation,
    Duration,
    Context,
    Response,
    Mono,
    BinaryData,
    BigDecimal,
    LocalDate,
    OffsetDateTime,
    Uuid,
    Map,
    ManagementException,
    HttpResponseException,
    IllegalArgumentException,
    RuntimeException,
}

impl Known {
    /// Returns the package and simple name of this class for
    /// the given runtime.
    pub fn qualified(self, generation: PipelineGeneration) -> (&'static str, &'static str) {
        let azure = generation.is_azure();
        match self {
            Self::HttpPipeline if azure => ("com.azure.core.http", "HttpPipeline"),
            Self::HttpPipeline => ("io.clientcore.core.http.pipeline", "HttpPipeline"),
            Self::SerializerAdapter => ("com.azure.core.util.serializer", "SerializerAdapter"),
            Self::Instrumentation => ("io.clientcore.core.instrumentation", "Instrumentation"),
            Self::Duration => ("java.time", "Duration"),
            Self::Context if azure => ("com.azure.core.util", "Context"),
            Self::Context => ("io.clientcore.core.http.models", "RequestContext"),
            Self::Response if azure => ("com.azure.core.http.rest", "Response"),
            Self::Response => ("io.clientcore.core.http.models", "Response"),
            Self::Mono => ("reactor.core.publisher", "Mono"),
            Self::BinaryData if azure => ("com.azure.core.util", "BinaryData"),
            Self::BinaryData => ("io.clientcore.core.models.binarydata", "BinaryData"),
            Self::BigDecimal => ("java.math", "BigDecimal"),
            Self::LocalDate => ("java.time", "LocalDate"),
            Self::OffsetDateTime => ("java.time", "OffsetDateTime"),
            Self::Uuid => ("java.util", "UUID"),
            Self::Map => ("java.util", "Map"),
            Self::ManagementException => ("com.azure.core.management.exception", "ManagementException"),
            Self::HttpResponseException if azure => ("com.azure.core.exception", "HttpResponseException"),
            Self::HttpResponseException => ("io.clientcore.core.http.models", "HttpResponseException"),
            Self::IllegalArgumentException => ("java.lang", "IllegalArgumentException"),
            Self::RuntimeException => ("java.lang", "RuntimeException"),
        }
    }

    /// Adds this class to a registry, and returns its ID.
    pub fn register(self, types: &mut TypeRegistry, generation: PipelineGeneration) -> ClientTypeId {
        let (package, name) = self.qualified(generation);
        types.class(package, name)
    }
}
