use rustc_hash::FxHashMap;

use crate::ir::SchemaId;

/// The identity of a type in a [`TypeRegistry`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClientTypeId(usize);

impl ClientTypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A type in the generated client library.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ClientType {
    Primitive(PrimitiveType),
    Class(ClassType),
    Enum(EnumType),
    /// A list of elements.
    Collection(ClientTypeId),
    /// A parameterized class, like `Map<String, V>` or `Response<T>`.
    Generic(GenericType),
}

impl ClientType {
    /// Returns the simple name of this type, without its package or
    /// type arguments.
    pub fn simple_name(&self) -> &str {
        match self {
            Self::Primitive(ty) => ty.boxed_name(),
            Self::Class(ty) => &ty.name,
            Self::Enum(ty) => &ty.name,
            Self::Collection(_) => "List",
            Self::Generic(ty) => &ty.name,
        }
    }

    /// Returns `true` if values of this type can be `null`.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Primitive(ty) => ty.is_nullable(),
            _ => true,
        }
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            Self::Class(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Self::Enum(ty) => Some(ty),
            _ => None,
        }
    }
}

/// A built-in Java type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimitiveType {
    Void,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    ByteArray,
    Object,
}

impl PrimitiveType {
    /// Returns the name of this type as it's declared in a signature.
    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "String",
            Self::ByteArray => "byte[]",
            Self::Object => "Object",
        }
    }

    /// Returns the name of the reference type for this type, for use
    /// as a type argument or a nullable value.
    pub fn boxed_name(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Boolean => "Boolean",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::ByteArray => "byte[]",
            Self::Object => "Object",
        }
    }

    #[inline]
    pub fn is_nullable(self) -> bool {
        !matches!(
            self,
            Self::Boolean | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    /// Returns the suffix for conversion methods that take or return
    /// this type, like the `String` in `fromString`.
    pub fn method_suffix(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "Bytes",
            Self::Void | Self::String | Self::Object => "String",
        }
    }
}

/// A class, either from a library or generated from a schema.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ClassType {
    pub package: String,
    pub name: String,
    /// The generated model for this class, or `None` if the class
    /// comes from a library.
    pub model: Option<ModelDef>,
}

impl ClassType {
    /// Creates a library class, like `com.azure.core.http.HttpPipeline`.
    pub fn known(package: &str, name: &str) -> Self {
        Self {
            package: package.to_owned(),
            name: name.to_owned(),
            model: None,
        }
    }

    /// Creates a library class from its fully qualified name.
    pub fn from_qualified_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((package, name)) => Self::known(package, name),
            None => Self::known("", name),
        }
    }

    pub fn qualified_name(&self) -> String {
        match self.package.as_str() {
            "" => self.name.clone(),
            package => format!("{package}.{}", self.name),
        }
    }
}

/// A generated model class.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ModelDef {
    pub description: String,
    pub kind: ModelKind,
    pub parent: Option<ClientTypeId>,
    /// Types that extend this model.
    pub children: Vec<ClientTypeId>,
    /// The wire name of the property that selects a subtype, if this
    /// model is the root of a type hierarchy.
    pub discriminator: Option<String>,
    /// The value of the discriminator property that selects this model.
    pub discriminator_value: Option<String>,
    pub properties: Vec<ModelProperty>,
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum ModelKind {
    /// A model generated from an object schema.
    #[default]
    Object,
    /// A class that wraps a list in an outer XML element.
    XmlWrapper {
        /// The XML name of the outer element.
        wrapper_name: String,
        /// The XML name of each item.
        item_name: String,
    },
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ModelProperty {
    /// The Java field name.
    pub name: String,
    /// The name of the property on the wire.
    pub serialized_name: String,
    pub ty: ClientTypeId,
    pub required: bool,
    pub read_only: bool,
    pub description: Option<String>,
}

/// A generated enum.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EnumType {
    pub package: String,
    pub name: String,
    pub description: String,
    /// If `true`, callers can create values that aren't listed in
    /// `members`.
    pub expandable: bool,
    pub value_type: PrimitiveType,
    pub members: Vec<EnumMember>,
    /// The name of the method that converts a member to its wire value.
    pub to_method: String,
    /// The name of the method that converts a wire value to a member.
    pub from_method: String,
}

impl EnumType {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EnumMember {
    pub name: String,
    /// The wire value, formatted as text.
    pub value: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GenericType {
    pub package: String,
    pub name: String,
    pub args: Vec<ClientTypeId>,
}

/// All the types in a generated client library.
///
/// Types mapped from schemas are keyed by schema identity: mapping the
/// same schema twice returns the same type. Types that the mappers
/// synthesize, like `Response<T>`, are interned by their structure.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<ClientType>,
    schemas: FxHashMap<SchemaId, ClientTypeId>,
    interned: FxHashMap<ClientType, ClientTypeId>,
}

impl TypeRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: ClientTypeId) -> &ClientType {
        &self.types[id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: ClientTypeId) -> &mut ClientType {
        &mut self.types[id.0]
    }

    /// Returns the type that a schema is mapped to, if it's been mapped.
    #[inline]
    pub fn lookup(&self, schema: SchemaId) -> Option<ClientTypeId> {
        self.schemas.get(&schema).copied()
    }

    /// Adds a new type. Unlike [`TypeRegistry::intern`], this always
    /// allocates a new ID, even if an identical type already exists.
    pub(crate) fn insert(&mut self, ty: ClientType) -> ClientTypeId {
        let id = ClientTypeId(self.types.len());
        self.types.push(ty);
        id
    }

    /// Records that a schema maps to a type.
    pub(crate) fn bind(&mut self, schema: SchemaId, ty: ClientTypeId) {
        self.schemas.insert(schema, ty);
    }

    /// Returns the ID of a structurally identical type, adding it if
    /// it doesn't exist yet.
    pub fn intern(&mut self, ty: ClientType) -> ClientTypeId {
        if let Some(&id) = self.interned.get(&ty) {
            return id;
        }
        let id = self.insert(ty.clone());
        self.interned.insert(ty, id);
        id
    }

    pub fn primitive(&mut self, ty: PrimitiveType) -> ClientTypeId {
        self.intern(ClientType::Primitive(ty))
    }

    pub fn class(&mut self, package: &str, name: &str) -> ClientTypeId {
        self.intern(ClientType::Class(ClassType::known(package, name)))
    }

    pub fn generic(&mut self, package: &str, name: &str, args: Vec<ClientTypeId>) -> ClientTypeId {
        self.intern(ClientType::Generic(GenericType {
            package: package.to_owned(),
            name: name.to_owned(),
            args,
        }))
    }

    pub fn list(&mut self, element: ClientTypeId) -> ClientTypeId {
        self.intern(ClientType::Collection(element))
    }

    #[inline]
    pub fn is_nullable(&self, id: ClientTypeId) -> bool {
        self.get(id).is_nullable()
    }

    #[inline]
    pub fn is_void(&self, id: ClientTypeId) -> bool {
        matches!(self.get(id), ClientType::Primitive(PrimitiveType::Void))
    }

    /// Returns all types, in the order that they were added.
    pub fn iter(&self) -> impl Iterator<Item = (ClientTypeId, &ClientType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (ClientTypeId(index), ty))
    }

    /// Returns all generated enums.
    pub fn enums(&self) -> impl Iterator<Item = (ClientTypeId, &EnumType)> {
        self.iter().filter_map(|(id, ty)| Some((id, ty.as_enum()?)))
    }

    /// Returns all generated model classes.
    pub fn models(&self) -> impl Iterator<Item = (ClientTypeId, &ClassType, &ModelDef)> {
        self.iter().filter_map(|(id, ty)| {
            let class = ty.as_class()?;
            Some((id, class, class.model.as_ref()?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_structural() {
        let mut registry = TypeRegistry::new();

        let string = registry.primitive(PrimitiveType::String);
        let first = registry.list(string);
        let second = registry.list(string);

        assert_eq!(first, second);
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn test_insert_is_not_structural() {
        let mut registry = TypeRegistry::new();

        let first = registry.insert(ClientType::Class(ClassType::known("com.contoso", "Widget")));
        let second = registry.insert(ClientType::Class(ClassType::known("com.contoso", "Widget")));

        assert_ne!(first, second);
    }

    #[test]
    fn test_nullability() {
        let mut registry = TypeRegistry::new();

        let int = registry.primitive(PrimitiveType::Int);
        let string = registry.primitive(PrimitiveType::String);
        let list = registry.list(int);

        assert!(!registry.is_nullable(int));
        assert!(registry.is_nullable(string));
        assert!(registry.is_nullable(list));
    }

    #[test]
    fn test_qualified_names() {
        let class = ClassType::from_qualified_name("com.azure.core.exception.ResourceNotFoundException");

        assert_eq!(class.package, "com.azure.core.exception");
        assert_eq!(class.name, "ResourceNotFoundException");
        assert_eq!(
            class.qualified_name(),
            "com.azure.core.exception.ResourceNotFoundException"
        );
    }
}
