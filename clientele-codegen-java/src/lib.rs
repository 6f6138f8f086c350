//! Renders a Clientele client model as Java source files.

mod class;
mod client;
mod emit;
mod enum_;
mod extension;
mod file;
mod group;
mod imports;
mod method;
mod package_info;
mod proxy;
mod runtime;
mod template;
mod ty;
mod writer;

#[cfg(test)]
mod tests;

pub use class::JavaModel;
pub use client::JavaServiceClient;
pub use emit::{Emitter, GeneratedFiles, Stage};
pub use enum_::JavaEnum;
pub use extension::{ExtraBlock, ExtraMethod, TemplateExtensions};
pub use file::JavaFile;
pub use group::JavaMethodGroup;
pub use imports::Imports;
pub use method::JavaClientMethod;
pub use package_info::{JavaPackageInfo, PackageRole};
pub use proxy::JavaProxy;
pub use template::{Rendered, Template};
pub use ty::JavaType;
pub use writer::{Javadoc, JavaWriter};
