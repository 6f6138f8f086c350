use super::{known::Known, type_::TypeMapper};
use crate::{
    error::GenerateError,
    ir::{ApiSpec, RawOperation, SchemaId},
    model::{ClientTypeId, PrimitiveType},
};

/// The most specific schema that describes every one of
/// a set of schemas.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LowestCommon {
    Schema(SchemaId),
    /// The schemas have nothing in common.
    Any,
}

impl LowestCommon {
    /// Finds the lowest common schema: the schema itself if all the
    /// schemas are the same, or the closest common ancestor of a set
    /// of objects. Returns `None` for an empty set.
    pub fn of(spec: &ApiSpec<'_>, schemas: impl IntoIterator<Item = SchemaId>) -> Option<Self> {
        let mut schemas = schemas.into_iter();
        let first = schemas.next()?;
        Some(schemas.fold(Self::Schema(first), |common, schema| match common {
            Self::Schema(common) if common == schema => Self::Schema(common),
            Self::Schema(common) => {
                let ancestors: Vec<_> = spec.ancestors(common).collect();
                spec.ancestors(schema)
                    .find(|ancestor| ancestors.contains(ancestor))
                    .map_or(Self::Any, Self::Schema)
            }
            Self::Any => Self::Any,
        }))
    }
}

impl TypeMapper<'_> {
    /// Returns the type of the response body for an operation,
    /// or `Void` if none of its successful responses have a body.
    ///
    /// If the successful responses have different schemas, the body type
    /// is their lowest common schema, or `Object` if they don't have one.
    /// Arrays of XML-wrapped elements are returned as their wrapper class.
    pub fn expected_response_body_type(
        &mut self,
        operation: &RawOperation<'_>,
    ) -> Result<ClientTypeId, GenerateError> {
        let spec = self.spec();
        let schemas = operation
            .responses
            .iter()
            .filter(|response| response.def.is_success())
            .filter_map(|response| response.schema);
        match LowestCommon::of(spec, schemas) {
            None => Ok(self.types_mut().primitive(PrimitiveType::Void)),
            Some(LowestCommon::Any) => Ok(self.types_mut().primitive(PrimitiveType::Object)),
            Some(LowestCommon::Schema(schema)) if spec.schema(schema).is_xml_wrapped_array() => {
                self.xml_wrapper(schema)
            }
            Some(LowestCommon::Schema(schema)) => self.resolve(schema),
        }
    }

    /// Returns the type of the exception for unexpected responses that
    /// don't have their own exception.
    pub fn default_exception(&mut self) -> ClientTypeId {
        if self.settings().is_fluent() {
            self.known(Known::ManagementException)
        } else {
            self.known(Known::HttpResponseException)
        }
    }
}
