use crate::{imports::Imports, writer::JavaWriter};

/// Renders one node of the client model as the body of a Java file.
///
/// Templates write their declarations and record the classes they refer
/// to; assembling the file, with its package and imports, is up to the
/// caller.
pub trait Template {
    fn write(&self, w: &mut JavaWriter, imports: &mut Imports);

    fn render(&self) -> Rendered {
        let mut w = JavaWriter::new();
        let mut imports = Imports::new();
        self.write(&mut w, &mut imports);
        Rendered {
            body: w.finish(),
            imports,
        }
    }
}

/// The output of a [`Template`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Rendered {
    pub body: String,
    pub imports: Imports,
}
