use std::path::Path;

use miette::{Context, IntoDiagnostic};

pub mod naming;
mod unique;

pub use unique::{NameScope, UniqueNames, WordSegments};

/// Writes a generated file to `output`, creating any missing parent
/// directories.
pub fn write_to_disk(output: &Path, code: impl IntoCode) -> miette::Result<()> {
    let code = code.into_code();
    let path = output.join(code.path());
    let string = code.into_string()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .with_context(|| format!("Failed to create directory `{}`", parent.display()))?;
    }
    std::fs::write(&path, string)
        .into_diagnostic()
        .with_context(|| format!("Failed to write `{}`", path.display()))?;
    Ok(())
}

/// A generated source file.
pub trait Code {
    /// The path of the file, relative to the output directory.
    fn path(&self) -> &str;

    fn into_string(self) -> miette::Result<String>;
}

impl<T: AsRef<str>> Code for (T, String) {
    fn path(&self) -> &str {
        self.0.as_ref()
    }

    fn into_string(self) -> miette::Result<String> {
        Ok(self.1)
    }
}

impl<'a, T: AsRef<str>> Code for (T, &'a str) {
    fn path(&self) -> &str {
        self.0.as_ref()
    }

    fn into_string(self) -> miette::Result<String> {
        Ok(self.1.to_owned())
    }
}

pub trait IntoCode {
    type Code: Code;

    fn into_code(self) -> Self::Code;
}

impl<T: Code> IntoCode for T {
    type Code = T;

    fn into_code(self) -> Self::Code {
        self
    }
}
