use clientele_core::codegen::IntoCode;

use crate::template::Rendered;

/// A complete Java source file: the license header, package
/// declaration, imports, and the rendered body.
#[derive(Clone, Debug)]
pub struct JavaFile<'a> {
    package: &'a str,
    name: &'a str,
    header: Option<&'a str>,
    rendered: Rendered,
}

impl<'a> JavaFile<'a> {
    pub fn new(package: &'a str, name: &'a str, rendered: Rendered) -> Self {
        Self {
            package,
            name,
            header: None,
            rendered,
        }
    }

    pub fn with_header(self, header: Option<&'a str>) -> Self {
        Self { header, ..self }
    }

    /// Returns the path of this file, relative to the project root.
    pub fn path(&self) -> String {
        format!(
            "src/main/java/{}/{}.java",
            self.package.replace('.', "/"),
            self.name
        )
    }

    pub fn contents(&self) -> String {
        let mut out = String::new();
        if let Some(header) = self.header {
            for line in header.lines() {
                match line.trim_end() {
                    "" => out.push_str("//\n"),
                    line => {
                        out.push_str("// ");
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
            out.push('\n');
        }

        // A package's documentation comes before its declaration.
        if self.name == "package-info" {
            out.push_str(&self.rendered.body);
            out.push_str(&format!("package {};\n", self.package));
            return out;
        }

        out.push_str(&format!("package {};\n\n", self.package));
        let mut imports = self.rendered.imports.for_package(self.package).peekable();
        if imports.peek().is_some() {
            for import in imports {
                out.push_str(&format!("import {import};\n"));
            }
            out.push('\n');
        }
        out.push_str(&self.rendered.body);
        out
    }
}

impl IntoCode for JavaFile<'_> {
    type Code = (String, String);

    fn into_code(self) -> Self::Code {
        (self.path(), self.contents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::imports::Imports;

    #[test]
    fn test_file_layout() {
        let mut imports = Imports::new();
        imports
            .add("reactor.core.publisher.Mono")
            .add("com.contoso.widgets.models.Widget")
            .add("com.contoso.widgets.implementation.Sibling")
            .add("java.lang.IllegalArgumentException");
        let file = JavaFile::new(
            "com.contoso.widgets.implementation",
            "WidgetsImpl",
            Rendered {
                body: "public final class WidgetsImpl {\n}\n".to_owned(),
                imports,
            },
        )
        .with_header(Some("Copyright (c) Contoso.\n\nCode generated by Clientele."));

        assert_eq!(
            file.path(),
            "src/main/java/com/contoso/widgets/implementation/WidgetsImpl.java"
        );
        assert_eq!(
            file.contents(),
            indoc! {"
                // Copyright (c) Contoso.
                //
                // Code generated by Clientele.

                package com.contoso.widgets.implementation;

                import com.contoso.widgets.models.Widget;
                import reactor.core.publisher.Mono;

                public final class WidgetsImpl {
                }
            "}
        );
    }

    #[test]
    fn test_file_without_imports() {
        let file = JavaFile::new(
            "com.contoso.widgets.models",
            "Color",
            Rendered {
                body: "public enum Color {\n}\n".to_owned(),
                imports: Imports::new(),
            },
        );

        assert_eq!(
            file.contents(),
            indoc! {"
                package com.contoso.widgets.models;

                public enum Color {
                }
            "}
        );
    }
}
