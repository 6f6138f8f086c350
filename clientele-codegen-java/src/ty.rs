use std::fmt::{self, Display};

use clientele_core::model::{ClientType, ClientTypeId, TypeRegistry};
use itertools::Itertools;

use crate::imports::Imports;

/// Formats a client type as it's written in Java source.
#[derive(Clone, Copy, Debug)]
pub struct JavaType<'a> {
    types: &'a TypeRegistry,
    id: ClientTypeId,
    boxed: bool,
}

impl<'a> JavaType<'a> {
    #[inline]
    pub fn new(types: &'a TypeRegistry, id: ClientTypeId) -> Self {
        Self {
            types,
            id,
            boxed: false,
        }
    }

    /// Formats primitives as their reference types, like `Integer`
    /// for `int`.
    #[inline]
    pub fn boxed(self) -> Self {
        Self {
            boxed: true,
            ..self
        }
    }

    /// Formats primitives as reference types unless `required` is set,
    /// so that optional values can be `null`.
    #[inline]
    pub fn optional(self, required: bool) -> Self {
        Self {
            boxed: !required,
            ..self
        }
    }

    /// Adds the classes that this type mentions to `imports`.
    pub fn add_imports(&self, imports: &mut Imports) {
        match self.types.get(self.id) {
            ClientType::Primitive(_) => {}
            ClientType::Class(class) => {
                imports.add(class.qualified_name());
            }
            ClientType::Enum(ty) => {
                imports.add(ty.qualified_name());
            }
            &ClientType::Collection(element) => {
                imports.add("java.util.List");
                Self::new(self.types, element).add_imports(imports);
            }
            ClientType::Generic(generic) => {
                imports.add(format!("{}.{}", generic.package, generic.name));
                for &arg in &generic.args {
                    Self::new(self.types, arg).add_imports(imports);
                }
            }
        }
    }
}

impl Display for JavaType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.types.get(self.id) {
            ClientType::Primitive(ty) if self.boxed => f.write_str(ty.boxed_name()),
            ClientType::Primitive(ty) => f.write_str(ty.name()),
            ClientType::Class(class) => f.write_str(&class.name),
            ClientType::Enum(ty) => f.write_str(&ty.name),
            &ClientType::Collection(element) => {
                write!(f, "List<{}>", Self::new(self.types, element).boxed())
            }
            ClientType::Generic(generic) => write!(
                f,
                "{}<{}>",
                generic.name,
                generic
                    .args
                    .iter()
                    .map(|&arg| Self::new(self.types, arg).boxed())
                    .format(", ")
            ),
        }
    }
}
