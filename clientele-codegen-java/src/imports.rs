use std::collections::BTreeSet;

use clientele_core::model::{ClientTypeId, TypeRegistry};

use crate::ty::JavaType;

/// The classes that a generated file refers to, by fully
/// qualified name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Imports(BTreeSet<String>);

impl Imports {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. Names without a package are ignored.
    pub fn add(&mut self, qualified_name: impl Into<String>) -> &mut Self {
        let name = qualified_name.into();
        if name.contains('.') {
            self.0.insert(name);
        }
        self
    }

    /// Adds every class that a type mentions, including its
    /// type arguments.
    pub fn add_type(&mut self, types: &TypeRegistry, ty: ClientTypeId) -> &mut Self {
        JavaType::new(types, ty).add_imports(self);
        self
    }

    pub fn extend(&mut self, other: Imports) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    #[inline]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.0.contains(qualified_name)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the imports that a file in `package` needs, sorted.
    /// Classes in `java.lang` and in `package` itself don't need
    /// to be imported.
    pub fn for_package<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |name| match name.rsplit_once('.') {
            Some((parent, _)) => parent != "java.lang" && parent != package,
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clientele_core::model::PrimitiveType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_for_package_filters_implicit_imports() {
        let mut imports = Imports::new();
        imports
            .add("java.lang.IllegalArgumentException")
            .add("java.lang.reflect.InvocationTargetException")
            .add("com.contoso.widgets.models.Widget")
            .add("com.contoso.widgets.implementation.WidgetsImpl")
            .add("reactor.core.publisher.Mono")
            .add("String");

        let imports: Vec<_> = imports
            .for_package("com.contoso.widgets.implementation")
            .collect();
        assert_eq!(
            imports,
            [
                "com.contoso.widgets.models.Widget",
                "java.lang.reflect.InvocationTargetException",
                "reactor.core.publisher.Mono",
            ]
        );
    }

    #[test]
    fn test_add_type_includes_arguments() {
        let mut types = TypeRegistry::new();
        let widget = types.class("com.contoso.widgets.models", "Widget");
        let list = types.list(widget);
        let response = types.generic("com.azure.core.http.rest", "Response", vec![list]);
        let string = types.primitive(PrimitiveType::String);

        let mut imports = Imports::new();
        imports.add_type(&types, response).add_type(&types, string);

        let imports: Vec<_> = imports.iter().collect();
        assert_eq!(
            imports,
            [
                "com.azure.core.http.rest.Response",
                "com.contoso.widgets.models.Widget",
                "java.util.List",
            ]
        );
    }
}
