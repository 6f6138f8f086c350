use crate::parse::{
    ChoiceDef, ClientDef, ClientParameterDef, ObjectDef, OperationDef, OperationGroupDef,
    ParameterDef, PrimitiveFormat, PropertyDef, ResponseDef, SchemaInfo, SchemaUsage,
};

/// The identity of a schema in an [`ApiSpec`](super::ApiSpec).
///
/// Every named and inline schema gets its own ID, so two schemas with
/// the same name and shape are still distinct.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SchemaId(pub(super) usize);

impl SchemaId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A schema with all its references resolved to [`SchemaId`]s.
#[derive(Debug)]
pub struct RawSchema<'a> {
    pub id: SchemaId,
    /// Where this schema is defined in the document, like
    /// `schemas.Widget.properties.owner`.
    pub path: String,
    /// The schema's name from the document. Named schemas fall back to
    /// their key in `schemas`.
    pub name: Option<&'a str>,
    pub info: &'a SchemaInfo,
    pub kind: RawSchemaKind<'a>,
}

impl RawSchema<'_> {
    /// Returns the parent of this schema, if it's an object that
    /// extends another object.
    pub fn parent(&self) -> Option<SchemaId> {
        match &self.kind {
            RawSchemaKind::Object(object) => object.parent,
            _ => None,
        }
    }

    /// Returns `true` if this is an array whose elements are wrapped
    /// in an outer XML element.
    pub fn is_xml_wrapped_array(&self) -> bool {
        match &self.kind {
            RawSchemaKind::Array { xml_wrapped, .. } => {
                *xml_wrapped || self.info.usage.contains(&SchemaUsage::XmlWrapped)
            }
            _ => false,
        }
    }
}

#[derive(Debug)]
pub enum RawSchemaKind<'a> {
    Primitive(PrimitiveFormat),
    Array { items: SchemaId, xml_wrapped: bool },
    Dictionary { values: SchemaId },
    Choice(&'a ChoiceDef),
    Object(RawObject<'a>),
    Union { variants: Vec<SchemaId> },
}

#[derive(Debug)]
pub struct RawObject<'a> {
    pub def: &'a ObjectDef,
    pub parent: Option<SchemaId>,
    pub properties: Vec<RawProperty<'a>>,
}

#[derive(Debug)]
pub struct RawProperty<'a> {
    pub def: &'a PropertyDef,
    pub schema: SchemaId,
}

#[derive(Debug)]
pub struct RawClient<'a> {
    pub def: &'a ClientDef,
    pub parameters: Vec<RawClientParameter<'a>>,
    pub groups: Vec<RawOperationGroup<'a>>,
}

#[derive(Debug)]
pub struct RawClientParameter<'a> {
    pub def: &'a ClientParameterDef,
    pub schema: SchemaId,
}

#[derive(Debug)]
pub struct RawOperationGroup<'a> {
    pub def: &'a OperationGroupDef,
    pub operations: Vec<RawOperation<'a>>,
}

impl RawOperationGroup<'_> {
    /// Returns `true` if this group holds operations for the client
    /// itself, rather than for a method group.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.def.name.is_empty()
    }
}

#[derive(Debug)]
pub struct RawOperation<'a> {
    pub def: &'a OperationDef,
    pub parameters: Vec<RawParameter<'a>>,
    pub responses: Vec<RawResponse<'a>>,
}

#[derive(Debug)]
pub struct RawParameter<'a> {
    pub def: &'a ParameterDef,
    pub schema: Option<SchemaId>,
}

#[derive(Debug)]
pub struct RawResponse<'a> {
    pub def: &'a ResponseDef,
    pub schema: Option<SchemaId>,
}
