use rustc_hash::FxHashMap;
use tracing::debug;

use super::{
    describe,
    enum_::{EnumMapper, EnumMapping},
    known::Known,
    type_package,
};
use crate::{
    codegen::{
        NameScope, UniqueNames,
        naming::{class_name, variable_name},
    },
    error::GenerateError,
    ir::{ApiSpec, RawObject, RawSchema, RawSchemaKind, SchemaId},
    model::{
        ClassType, ClientType, ClientTypeId, ModelDef, ModelKind, ModelProperty, PrimitiveType,
        TypeRegistry,
    },
    parse::PrimitiveFormat,
    settings::Settings,
};

/// Maps schemas to client types.
///
/// Each schema maps to exactly one type: mapping the same schema again
/// returns the type from the first mapping. Generated classes and enums
/// get names that are unique within their package.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    spec: &'a ApiSpec<'a>,
    settings: &'a Settings,
    types: TypeRegistry,
    names: UniqueNames,
    /// XML wrapper classes, keyed by element type.
    wrappers: FxHashMap<ClientTypeId, ClientTypeId>,
}

impl<'a> TypeMapper<'a> {
    pub fn new(spec: &'a ApiSpec<'a>, settings: &'a Settings) -> Self {
        Self {
            spec,
            settings,
            types: TypeRegistry::new(),
            names: UniqueNames::new(),
            wrappers: FxHashMap::default(),
        }
    }

    /// Maps every schema in the API description, then fills in the properties of
    /// every model.
    ///
    /// Models are declared before their properties are mapped, so that
    /// models can refer to each other through their properties.
    pub fn map_all(mut self) -> Result<Self, GenerateError> {
        let spec = self.spec;
        for &id in spec.graph().resolution_order() {
            self.resolve(id)?;
        }
        for schema in spec.schemas() {
            if let RawSchemaKind::Object(object) = &schema.kind {
                self.define_model(schema, object)?;
            }
        }
        debug!(types = self.types.iter().count(), "Mapped all schemas");
        Ok(self)
    }

    /// Returns the type for a schema, mapping it if it hasn't been
    /// mapped yet.
    pub fn resolve(&mut self, id: SchemaId) -> Result<ClientTypeId, GenerateError> {
        if let Some(ty) = self.types.lookup(id) {
            return Ok(ty);
        }
        let spec = self.spec;
        let schema = spec.schema(id);
        let ty = match &schema.kind {
            &RawSchemaKind::Primitive(format) => self.primitive(format),
            &RawSchemaKind::Array { items, .. } => {
                let element = self.resolve(items)?;
                self.types.list(element)
            }
            &RawSchemaKind::Dictionary { values } => {
                let key = self.types.primitive(PrimitiveType::String);
                let values = self.resolve(values)?;
                let (package, name) = Known::Map.qualified(self.settings.pipeline_generation());
                self.types.generic(package, name, vec![key, values])
            }
            RawSchemaKind::Choice(choice) => {
                match EnumMapper::new(self.settings).map(schema, choice)? {
                    EnumMapping::Enum(mut ty) => {
                        ty.name = self.names.uniquify(&ty.package, &ty.name);
                        self.types.insert(ClientType::Enum(ty))
                    }
                    EnumMapping::Degraded(format) => self.primitive(format),
                }
            }
            RawSchemaKind::Object(object) => {
                if let Some(parent) = object.parent {
                    self.resolve(parent)?;
                }
                self.declare_model(schema)
            }
            RawSchemaKind::Union { .. } => self.known(Known::BinaryData),
        };
        self.types.bind(id, ty);
        Ok(ty)
    }

    /// Returns the type for a primitive format.
    pub fn primitive(&mut self, format: PrimitiveFormat) -> ClientTypeId {
        match primitive_type(format) {
            Some(ty) => self.types.primitive(ty),
            None => match format {
                PrimitiveFormat::Decimal => self.known(Known::BigDecimal),
                PrimitiveFormat::Date => self.known(Known::LocalDate),
                PrimitiveFormat::DateTime => self.known(Known::OffsetDateTime),
                PrimitiveFormat::Duration => self.known(Known::Duration),
                PrimitiveFormat::Uuid => self.known(Known::Uuid),
                _ => self.known(Known::BinaryData),
            },
        }
    }

    /// Returns the type for a library class.
    #[inline]
    pub fn known(&mut self, known: Known) -> ClientTypeId {
        known.register(&mut self.types, self.settings.pipeline_generation())
    }

    /// Returns the class that wraps the elements of an array schema in
    /// an outer XML element.
    ///
    /// Wrappers are shared by element type, and live in the implementation
    /// models package, unless the wrapper name is a custom type.
    pub fn xml_wrapper(&mut self, array: SchemaId) -> Result<ClientTypeId, GenerateError> {
        let spec = self.spec;
        let schema = spec.schema(array);
        let RawSchemaKind::Array { items, .. } = schema.kind else {
            return self.resolve(array);
        };
        let element = self.resolve(items)?;
        if let Some(&wrapper) = self.wrappers.get(&element) {
            return Ok(wrapper);
        }

        let element_name = self.types.get(element).simple_name().to_owned();
        let name = format!("{element_name}Wrapper");
        let package = if self.settings.is_custom_type(&name) {
            self.settings
                .package(&[self.settings.custom_types_subpackage()])
        } else {
            self.settings.package(&[
                self.settings.implementation_subpackage(),
                self.settings.models_subpackage(),
            ])
        };
        let name = self.names.uniquify(&package, &name);
        let list = self.types.list(element);
        let wrapper_name = schema
            .name
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{element_name}s"));

        let wrapper = self.types.insert(ClientType::Class(ClassType {
            package,
            name,
            model: Some(ModelDef {
                description: format!(
                    "A wrapper around List<{element_name}> which provides top-level metadata \
                    for serialization."
                ),
                kind: ModelKind::XmlWrapper {
                    wrapper_name,
                    item_name: element_name.clone(),
                },
                properties: vec![ModelProperty {
                    name: "items".to_owned(),
                    serialized_name: element_name,
                    ty: list,
                    required: true,
                    read_only: true,
                    description: None,
                }],
                ..Default::default()
            }),
        }));
        self.wrappers.insert(element, wrapper);
        Ok(wrapper)
    }

    #[inline]
    pub fn spec(&self) -> &'a ApiSpec<'a> {
        self.spec
    }

    #[inline]
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    #[inline]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[inline]
    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    /// Returns the names taken so far, so that other generated
    /// classes can avoid them.
    #[inline]
    pub fn names_mut(&mut self) -> &mut UniqueNames {
        &mut self.names
    }

    #[inline]
    pub fn into_types(self) -> TypeRegistry {
        self.types
    }

    /// Adds a model class for an object schema, without its properties.
    fn declare_model(&mut self, schema: &RawSchema<'a>) -> ClientTypeId {
        let name = class_name(match schema.name {
            Some(name) => name,
            // Inline objects are named after where they're defined.
            None => schema.path.rsplit('.').next().unwrap_or(&schema.path),
        });
        let package = type_package(self.settings, schema.info, &name, true);
        let name = self.names.uniquify(&package, &name);
        let description = describe(
            schema.info.summary.as_deref(),
            schema.info.description.as_deref(),
        )
        .unwrap_or_else(|| format!("The {name} model."));
        let (discriminator, discriminator_value) = match &schema.kind {
            RawSchemaKind::Object(object) => (
                object.def.discriminator.clone(),
                object.def.discriminator_value.clone(),
            ),
            _ => (None, None),
        };
        self.types.insert(ClientType::Class(ClassType {
            package,
            name,
            model: Some(ModelDef {
                description,
                discriminator,
                discriminator_value,
                ..Default::default()
            }),
        }))
    }

    /// Fills in the properties and parent of a declared model, and
    /// links it to its parent.
    fn define_model(
        &mut self,
        schema: &RawSchema<'a>,
        object: &RawObject<'a>,
    ) -> Result<(), GenerateError> {
        let id = self.resolve(schema.id)?;
        let parent = object
            .parent
            .map(|parent| self.resolve(parent))
            .transpose()?;

        let mut scope = NameScope::new();
        let mut properties = Vec::with_capacity(object.properties.len());
        for property in &object.properties {
            let ty = self.resolve(property.schema)?;
            properties.push(ModelProperty {
                name: scope
                    .uniquify(&variable_name(&property.def.name))
                    .into_owned(),
                serialized_name: property
                    .def
                    .serialized_name
                    .clone()
                    .unwrap_or_else(|| property.def.name.clone()),
                ty,
                required: property.def.required,
                read_only: property.def.read_only,
                description: property.def.description.clone(),
            });
        }

        if let ClientType::Class(ClassType {
            model: Some(model), ..
        }) = self.types.get_mut(id)
        {
            model.properties = properties;
            model.parent = parent;
        }
        if let Some(parent) = parent
            && let ClientType::Class(ClassType {
                model: Some(model), ..
            }) = self.types.get_mut(parent)
        {
            model.children.push(id);
        }
        Ok(())
    }
}

/// Returns the built-in type for a primitive format, or `None` if
/// the format maps to a library class.
pub(crate) fn primitive_type(format: PrimitiveFormat) -> Option<PrimitiveType> {
    Some(match format {
        PrimitiveFormat::String | PrimitiveFormat::Url => PrimitiveType::String,
        PrimitiveFormat::Boolean => PrimitiveType::Boolean,
        PrimitiveFormat::Int32 => PrimitiveType::Int,
        PrimitiveFormat::Int64 => PrimitiveType::Long,
        PrimitiveFormat::Float32 => PrimitiveType::Float,
        PrimitiveFormat::Float64 => PrimitiveType::Double,
        PrimitiveFormat::Bytes => PrimitiveType::ByteArray,
        PrimitiveFormat::Any => PrimitiveType::Object,
        PrimitiveFormat::Decimal
        | PrimitiveFormat::Date
        | PrimitiveFormat::DateTime
        | PrimitiveFormat::Duration
        | PrimitiveFormat::Uuid
        | PrimitiveFormat::Binary => return None,
    })
}
