use clientele_core::{
    codegen::naming::string_literal,
    model::{EnumType, PrimitiveType},
    settings::Settings,
};

use crate::{
    imports::Imports,
    runtime::Runtime,
    template::Template,
    writer::{JavaWriter, Javadoc},
};

/// Renders an enum.
///
/// Expandable string enums extend `ExpandableStringEnum`, so that callers
/// can use values that aren't members. Everything else is a closed Java
/// `enum`.
#[derive(Clone, Copy, Debug)]
pub struct JavaEnum<'a> {
    ty: &'a EnumType,
    runtime: Runtime,
}

impl<'a> JavaEnum<'a> {
    pub fn new(ty: &'a EnumType, settings: &Settings) -> Self {
        Self {
            ty,
            runtime: Runtime::new(settings),
        }
    }

    fn write_expandable(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let name = &self.ty.name;
        imports
            .add("com.azure.core.util.ExpandableStringEnum")
            .add("java.util.Collection");

        w.javadoc(&Javadoc::new(&self.ty.description));
        w.block(
            format!("public final class {name} extends ExpandableStringEnum<{name}>"),
            |w| {
                for member in &self.ty.members {
                    w.javadoc(&Javadoc::new(member.description.clone().unwrap_or_else(
                        || format!("Static value {} for {name}.", member.value),
                    )));
                    w.line(format!(
                        "public static final {name} {} = fromString({});",
                        member.name,
                        string_literal(&member.value)
                    ));
                    w.blank();
                }

                w.javadoc(
                    &Javadoc::new(format!("Creates a new instance of {name} value."))
                        .deprecated("Use the {@link #fromString(String)} factory method."),
                );
                w.line("@Deprecated");
                w.block(format!("public {name}()"), |_| {});
                w.blank();

                w.javadoc(
                    &Javadoc::new(format!(
                        "Creates or finds a {name} from its string representation."
                    ))
                    .param("name", "a name to look for.")
                    .returns(format!("the corresponding {name}.")),
                );
                w.block(format!("public static {name} fromString(String name)"), |w| {
                    w.line(format!("return fromString(name, {name}.class);"));
                });
                w.blank();

                // Constants are created with the custom method names, so
                // they must exist alongside the inherited ones.
                let from_method = &self.ty.from_method;
                if from_method != "fromString" {
                    w.javadoc(
                        &Javadoc::new(format!(
                            "Creates or finds a {name} from its string representation."
                        ))
                        .param("name", "a name to look for.")
                        .returns(format!("the corresponding {name}.")),
                    );
                    w.block(
                        format!("public static {name} {from_method}(String name)"),
                        |w| {
                            w.line("return fromString(name);");
                        },
                    );
                    w.blank();
                }
                let to_method = &self.ty.to_method;
                if to_method != "toString" {
                    w.javadoc(
                        &Javadoc::new(format!("Serializes this {name} to its string value."))
                            .returns("the string value."),
                    );
                    w.block(format!("public String {to_method}()"), |w| {
                        w.line("return toString();");
                    });
                    w.blank();
                }

                w.javadoc(
                    &Javadoc::new(format!("Gets known {name} values."))
                        .returns(format!("known {name} values.")),
                );
                w.block(format!("public static Collection<{name}> values()"), |w| {
                    w.line(format!("return values({name}.class);"));
                });
            },
        );
    }

    fn write_closed(&self, w: &mut JavaWriter, imports: &mut Imports) {
        let ty = self.ty;
        let name = &ty.name;
        let value_type = ty.value_type.name();
        let jackson = self.runtime.uses_jackson();
        if jackson {
            imports
                .add("com.fasterxml.jackson.annotation.JsonCreator")
                .add("com.fasterxml.jackson.annotation.JsonValue");
        }

        w.javadoc(&Javadoc::new(&ty.description));
        w.block(format!("public enum {name}"), |w| {
            if ty.members.is_empty() {
                w.line(";");
                w.blank();
            }
            for (index, member) in ty.members.iter().enumerate() {
                w.javadoc(&Javadoc::new(
                    member
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("Enum value {}.", member.value)),
                ));
                let terminator = if index + 1 == ty.members.len() { ";" } else { "," };
                w.line(format!(
                    "{}({}){terminator}",
                    member.name,
                    literal(ty.value_type, &member.value)
                ));
                w.blank();
            }

            w.javadoc(&Javadoc::new(format!(
                "The actual serialized value for a {name} instance."
            )));
            w.line(format!("private final {value_type} value;"));
            w.blank();
            w.block(format!("{name}({value_type} value)"), |w| {
                w.line("this.value = value;");
            });
            w.blank();

            w.javadoc(
                &Javadoc::new(format!("Parses a serialized value to a {name} instance."))
                    .param("value", "the serialized value to parse.")
                    .returns(format!(
                        "the parsed {name} object, or null if unable to parse."
                    )),
            );
            if jackson {
                w.line("@JsonCreator");
            }
            let parameter = if ty.value_type == PrimitiveType::String {
                "String"
            } else {
                ty.value_type.boxed_name()
            };
            w.block(
                format!("public static {name} {}({parameter} value)", ty.from_method),
                |w| {
                    w.block("if (value == null)", |w| {
                        w.line("return null;");
                    });
                    w.line(format!("{name}[] items = {name}.values();"));
                    w.block(format!("for ({name} item : items)"), |w| {
                        let matches = match ty.value_type {
                            PrimitiveType::String => "item.value.equalsIgnoreCase(value)",
                            _ => "item.value == value",
                        };
                        w.block(format!("if ({matches})"), |w| {
                            w.line("return item;");
                        });
                    });
                    w.line("return null;");
                },
            );
            w.blank();

            if ty.value_type == PrimitiveType::String && ty.to_method == "toString" {
                w.javadoc(&Javadoc::new("{@inheritDoc}"));
                if jackson {
                    w.line("@JsonValue");
                }
                w.line("@Override");
                w.block("public String toString()", |w| {
                    w.line("return this.value;");
                });
                return;
            }

            w.javadoc(
                &Javadoc::new(format!("De-serializes the instance to {value_type} value."))
                    .returns(format!("the {value_type} value.")),
            );
            if jackson {
                w.line("@JsonValue");
            }
            w.block(format!("public {value_type} {}()", ty.to_method), |w| {
                w.line("return this.value;");
            });
            w.blank();
            w.javadoc(&Javadoc::new("{@inheritDoc}"));
            w.line("@Override");
            w.block("public String toString()", |w| {
                w.line("return String.valueOf(this.value);");
            });
        });
    }
}

impl Template for JavaEnum<'_> {
    fn write(&self, w: &mut JavaWriter, imports: &mut Imports) {
        // The expandable base class is only in the Azure runtime.
        if self.ty.expandable && self.runtime.is_azure() {
            self.write_expandable(w, imports);
        } else {
            self.write_closed(w, imports);
        }
    }
}

/// Formats a member value as a Java literal.
fn literal(ty: PrimitiveType, value: &str) -> String {
    match ty {
        PrimitiveType::String => string_literal(value),
        PrimitiveType::Long => format!("{value}L"),
        PrimitiveType::Float => format!("{value}f"),
        _ => value.to_owned(),
    }
}
