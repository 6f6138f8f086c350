use crate::{
    imports::Imports,
    template::Template,
    writer::{JavaWriter, Javadoc},
};

/// What a package holds, which decides how its `package-info.java`
/// describes it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PackageRole {
    Implementation,
    Models,
    Classes,
}

/// Renders the documentation comment for a `package-info.java` file.
#[derive(Clone, Copy, Debug)]
pub struct JavaPackageInfo<'a> {
    title: &'a str,
    role: PackageRole,
}

impl<'a> JavaPackageInfo<'a> {
    pub fn new(title: &'a str, role: PackageRole) -> Self {
        Self { title, role }
    }
}

impl Template for JavaPackageInfo<'_> {
    fn write(&self, w: &mut JavaWriter, _: &mut Imports) {
        let title = self.title;
        w.javadoc(&Javadoc::new(match self.role {
            PackageRole::Implementation => {
                format!("Package containing the implementations for {title}.")
            }
            PackageRole::Models => format!("Package containing the data models for {title}."),
            PackageRole::Classes => format!("Package containing the classes for {title}."),
        }));
    }
}
