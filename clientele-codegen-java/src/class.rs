use clientele_core::{
    codegen::naming::{getter_name, setter_name, wither_name},
    model::{ClassType, ClientType, ClientTypeId, ModelDef, ModelKind, ModelProperty, TypeRegistry},
    settings::Settings,
};
use itertools::Itertools;

use crate::{
    extension::TemplateExtensions,
    imports::Imports,
    runtime::Runtime,
    template::Template,
    ty::JavaType,
    writer::{JavaWriter, Javadoc},
};

/// Renders a model class.
///
/// Polymorphic models carry Jackson type annotations, so that a parent
/// deserializes to the subtype that its discriminator selects. Fluent
/// models use `name()`/`withName()` accessors; other models use
/// `getName()`/`setName()`.
#[derive(Clone, Copy, Debug)]
pub struct JavaModel<'a> {
    types: &'a TypeRegistry,
    class: &'a ClassType,
    model: &'a ModelDef,
    fluent: bool,
    runtime: Runtime,
    extensions: Option<&'a TemplateExtensions>,
}

impl<'a> JavaModel<'a> {
    pub fn new(
        types: &'a TypeRegistry,
        class: &'a ClassType,
        model: &'a ModelDef,
        settings: &Settings,
    ) -> Self {
        Self {
            types,
            class,
            model,
            fluent: settings.is_fluent(),
            runtime: Runtime::new(settings),
            extensions: None,
        }
    }

    pub fn with_extensions(self, extensions: Option<&'a TemplateExtensions>) -> Self {
        Self { extensions, ..self }
    }

    /// Returns the model at the root of this model's hierarchy.
    fn root(&self) -> &'a ModelDef {
        let mut model = self.model;
        while let Some(parent) = model.parent
            && let Some(parent) = model_of(self.types, parent)
        {
            model = parent;
        }
        model
    }

    fn write_type_annotations(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let root = self.root();
        let Some(discriminator) = &root.discriminator else {
            return;
        };
        let name = &self.class.name;
        if self.model.parent.is_none() {
            imports.add("com.fasterxml.jackson.annotation.JsonTypeInfo");
            w.line(format!(
                "@JsonTypeInfo(use = JsonTypeInfo.Id.NAME, include = JsonTypeInfo.As.PROPERTY, \
                property = \"{discriminator}\", defaultImpl = {name}.class, visible = true)"
            ));
        }
        if let Some(value) = &self.model.discriminator_value {
            imports.add("com.fasterxml.jackson.annotation.JsonTypeName");
            w.line(format!("@JsonTypeName(\"{value}\")"));
        }
        if !self.model.children.is_empty() {
            imports.add("com.fasterxml.jackson.annotation.JsonSubTypes");
            let subtypes = self
                .model
                .children
                .iter()
                .filter_map(|&child| {
                    let class = self.types.get(child).as_class()?;
                    let value = class
                        .model
                        .as_ref()
                        .and_then(|model| model.discriminator_value.as_deref())
                        .unwrap_or(&class.name);
                    Some(format!(
                        "@JsonSubTypes.Type(name = \"{value}\", value = {}.class)",
                        class.name
                    ))
                })
                .join(", ");
            w.line(format!("@JsonSubTypes({{ {subtypes} }})"));
        }
    }

    fn write_object(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let name = &self.class.name;
        let jackson = self.runtime.uses_jackson();
        let modifiers = if self.model.children.is_empty() {
            "public final class"
        } else {
            "public class"
        };
        let extends = match self.model.parent.map(|parent| self.types.get(parent)) {
            Some(ClientType::Class(parent)) => {
                imports.add(parent.qualified_name());
                format!(" extends {}", parent.name)
            }
            _ => String::new(),
        };

        w.javadoc(&Javadoc::new(&self.model.description));
        if jackson {
            self.write_type_annotations(w, imports);
        }
        w.block(format!("{modifiers} {name}{extends}"), |w| {
            for property in &self.model.properties {
                imports.add_type(self.types, property.ty);
                w.javadoc(&Javadoc::new(property_description(property)));
                if jackson {
                    imports.add("com.fasterxml.jackson.annotation.JsonProperty");
                    let access = match (property.required, property.read_only) {
                        (_, true) => ", access = JsonProperty.Access.WRITE_ONLY",
                        (true, false) => ", required = true",
                        (false, false) => "",
                    };
                    w.line(format!(
                        "@JsonProperty(value = \"{}\"{access})",
                        property.serialized_name
                    ));
                }
                w.line(format!(
                    "private {} {};",
                    JavaType::new(self.types, property.ty).optional(property.required),
                    property.name
                ));
                w.blank();
            }

            w.javadoc(&Javadoc::new(format!("Creates an instance of {name} class.")));
            w.block(format!("public {name}()"), |_| {});

            for property in &self.model.properties {
                let ty = JavaType::new(self.types, property.ty).optional(property.required);
                let description = property_description(property);
                let (getter, setter) = if self.fluent {
                    (property.name.clone(), wither_name(&property.name))
                } else {
                    (getter_name(&property.name), setter_name(&property.name))
                };

                w.blank();
                w.javadoc(
                    &Javadoc::new(format!("Get the {} property: {description}", property.name))
                        .returns(format!("the {} value.", property.name)),
                );
                w.block(format!("public {ty} {getter}()"), |w| {
                    w.line(format!("return this.{};", property.name));
                });
                if property.read_only {
                    continue;
                }

                w.blank();
                w.javadoc(
                    &Javadoc::new(format!("Set the {} property: {description}", property.name))
                        .param(&property.name, format!("the {} value to set.", property.name))
                        .returns(format!("the {name} object itself.")),
                );
                w.block(format!("public {name} {setter}({ty} {})", property.name), |w| {
                    w.line(format!("this.{0} = {0};", property.name));
                    w.line("return this;");
                });
            }

            if let Some(extensions) = self.extensions {
                extensions.write(w, imports);
            }
        });
    }

    fn write_xml_wrapper(
        &self,
        w: &mut JavaWriter,
        imports: &mut Imports,
        wrapper_name: &str,
        item_name: &str,
    ) {
        let name = &self.class.name;
        let jackson = self.runtime.uses_jackson();
        let Some(items) = self.model.properties.first() else {
            return;
        };
        imports.add_type(self.types, items.ty);
        let list = JavaType::new(self.types, items.ty);

        w.javadoc(&Javadoc::new(&self.model.description));
        if jackson {
            imports
                .add("com.fasterxml.jackson.dataformat.xml.annotation.JacksonXmlRootElement")
                .add("com.fasterxml.jackson.dataformat.xml.annotation.JacksonXmlProperty")
                .add("com.fasterxml.jackson.annotation.JsonCreator")
                .add("com.fasterxml.jackson.annotation.JsonProperty");
            w.line(format!(
                "@JacksonXmlRootElement(localName = \"{wrapper_name}\")"
            ));
        }
        w.block(format!("public final class {name}"), |w| {
            if jackson {
                w.line(format!("@JacksonXmlProperty(localName = \"{item_name}\")"));
            }
            w.line(format!("private final {list} items;"));
            w.blank();

            w.javadoc(
                &Javadoc::new(format!("Creates an instance of {name}."))
                    .param("items", "the list."),
            );
            let parameter = if jackson {
                w.line("@JsonCreator");
                format!("@JsonProperty(\"{item_name}\") {list} items")
            } else {
                format!("{list} items")
            };
            w.block(format!("public {name}({parameter})"), |w| {
                w.line("this.items = items;");
            });
            w.blank();

            w.javadoc(
                &Javadoc::new(format!("Get the {list} contained in this wrapper."))
                    .returns(format!("the {list}.")),
            );
            w.block(format!("public {list} items()"), |w| {
                w.line("return items;");
            });

            if let Some(extensions) = self.extensions {
                extensions.write(w, imports);
            }
        });
    }
}

impl Template for JavaModel<'_> {
    fn write(&self, w: &mut JavaWriter, imports: &mut Imports) {
        match &self.model.kind {
            ModelKind::Object => self.write_object(w, imports),
            ModelKind::XmlWrapper {
                wrapper_name,
                item_name,
            } => self.write_xml_wrapper(w, imports, wrapper_name, item_name),
        }
    }
}

fn model_of(types: &TypeRegistry, id: ClientTypeId) -> Option<&ModelDef> {
    types.get(id).as_class()?.model.as_ref()
}

fn property_description(property: &ModelProperty) -> String {
    match property.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => description.to_owned(),
        _ => format!("The {} property.", property.name),
    }
}
