use std::{fmt, sync::Arc};

use crate::{
    imports::Imports,
    writer::{JavaWriter, Javadoc},
};

/// A hand-written method to add to a generated class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtraMethod {
    pub javadoc: Option<Javadoc>,
    /// The method declaration, without the opening brace, like
    /// `public String describe()`.
    pub signature: String,
    /// The statements in the method body, one per line.
    pub body: Vec<String>,
    /// The classes that the method refers to.
    pub imports: Vec<String>,
}

impl ExtraMethod {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            javadoc: None,
            signature: signature.into(),
            body: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn line(mut self, statement: impl Into<String>) -> Self {
        self.body.push(statement.into());
        self
    }

    pub fn import(mut self, qualified_name: impl Into<String>) -> Self {
        self.imports.push(qualified_name.into());
        self
    }
}

/// A callback that writes extra declarations into a generated class.
pub type ExtraBlock = Arc<dyn Fn(&mut JavaWriter, &mut Imports) + Send + Sync>;

/// Additions to a generated class, written after its
/// generated members.
#[derive(Clone, Default)]
pub struct TemplateExtensions {
    methods: Vec<ExtraMethod>,
    block: Option<ExtraBlock>,
}

impl TemplateExtensions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: ExtraMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_block(
        mut self,
        block: impl Fn(&mut JavaWriter, &mut Imports) + Send + Sync + 'static,
    ) -> Self {
        self.block = Some(Arc::new(block));
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.block.is_none()
    }

    /// Writes the extra methods, then the extra block. Each is preceded
    /// by a blank line.
    pub fn write(&self, w: &mut JavaWriter, imports: &mut Imports) {
        for method in &self.methods {
            for import in &method.imports {
                imports.add(import.as_str());
            }
            w.blank();
            if let Some(javadoc) = &method.javadoc {
                w.javadoc(javadoc);
            }
            w.block(&method.signature, |w| {
                for statement in &method.body {
                    w.line(statement);
                }
            });
        }
        if let Some(block) = &self.block {
            w.blank();
            block(w, imports);
        }
    }
}

impl fmt::Debug for TemplateExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateExtensions")
            .field("methods", &self.methods)
            .field("block", &self.block.as_ref().map(|_| ".."))
            .finish()
    }
}
