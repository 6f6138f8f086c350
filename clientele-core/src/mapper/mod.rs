//! Maps an [`ApiSpec`] to a [`ClientModel`].

mod client;
mod enum_;
mod known;
mod method;
mod response;
mod type_;


pub use client::ClientModelBuilder;
pub use enum_::{EnumMapper, EnumMapping};
pub use known::Known;
pub use response::LowestCommon;
pub use type_::TypeMapper;

use crate::{
    error::GenerateError, ir::ApiSpec, model::ClientModel, parse::SchemaInfo, settings::Settings,
};

/// Maps every schema, then builds every client.
pub fn map(spec: &ApiSpec<'_>, settings: &Settings) -> Result<ClientModel, GenerateError> {
    let types = TypeMapper::new(spec, settings).map_all()?;
    ClientModelBuilder::new(spec, settings, types).build()
}

/// Returns the package for a generated model or enum.
///
/// Custom types win over everything else. Otherwise, internal types in
/// data-plane clients go in the implementation models package, and
/// everything else goes in the public models package.
pub(crate) fn type_package(
    settings: &Settings,
    info: &SchemaInfo,
    name: &str,
    fluent_models: bool,
) -> String {
    let namespace = info.namespace.as_deref();
    if settings.is_custom_type(name) {
        settings.package_in(namespace, &[settings.custom_types_subpackage()])
    } else if settings.is_data_plane_client() && info.is_internal() {
        settings.package_in(
            namespace,
            &[
                settings.implementation_subpackage(),
                settings.models_subpackage(),
            ],
        )
    } else if fluent_models && settings.is_fluent() {
        settings.package_in(
            namespace,
            &[settings.fluent_subpackage(), settings.models_subpackage()],
        )
    } else {
        settings.package_in(namespace, &[settings.models_subpackage()])
    }
}

/// Joins a summary and a description into one paragraph-separated
/// string, skipping whichever is empty.
pub(crate) fn describe(summary: Option<&str>, description: Option<&str>) -> Option<String> {
    let summary = summary.map(str::trim).filter(|text| !text.is_empty());
    let description = description.map(str::trim).filter(|text| !text.is_empty());
    match (summary, description) {
        (Some(summary), Some(description)) if summary != description => {
            Some(format!("{summary}\n\n{description}"))
        }
        (Some(text), _) | (None, Some(text)) => Some(text.to_owned()),
        (None, None) => None,
    }
}
