use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;
use serde::Deserialize;

use crate::{codegen::naming::is_package_name, error::ConfigurationError};

/// Generator settings as they appear in an API description or
/// a settings file.
///
/// Every field is optional, so that settings from several sources
/// can be layered with [`RawSettings::merge`] before they're resolved.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    pub namespace: Option<String>,
    pub is_fluent: Option<bool>,
    pub is_data_plane_client: Option<bool>,
    pub generate_sync_methods: Option<bool>,
    pub generate_async_methods: Option<bool>,
    pub pipeline_generation: Option<PipelineGeneration>,
    pub custom_types: Option<Vec<String>>,
    pub custom_types_subpackage: Option<String>,
    pub models_subpackage: Option<String>,
    pub implementation_subpackage: Option<String>,
    pub fluent_subpackage: Option<String>,
    pub use_client_logger: Option<bool>,
    pub use_source_enum_member_names: Option<bool>,
    pub license_header: Option<String>,
}

impl RawSettings {
    /// Layers `other` on top of these settings. Every setting that
    /// `other` specifies replaces the one in `self`.
    pub fn merge(self, other: RawSettings) -> RawSettings {
        RawSettings {
            namespace: other.namespace.or(self.namespace),
            is_fluent: other.is_fluent.or(self.is_fluent),
            is_data_plane_client: other.is_data_plane_client.or(self.is_data_plane_client),
            generate_sync_methods: other.generate_sync_methods.or(self.generate_sync_methods),
            generate_async_methods: other.generate_async_methods.or(self.generate_async_methods),
            pipeline_generation: other.pipeline_generation.or(self.pipeline_generation),
            custom_types: other.custom_types.or(self.custom_types),
            custom_types_subpackage: other.custom_types_subpackage.or(self.custom_types_subpackage),
            models_subpackage: other.models_subpackage.or(self.models_subpackage),
            implementation_subpackage: other
                .implementation_subpackage
                .or(self.implementation_subpackage),
            fluent_subpackage: other.fluent_subpackage.or(self.fluent_subpackage),
            use_client_logger: other.use_client_logger.or(self.use_client_logger),
            use_source_enum_member_names: other
                .use_source_enum_member_names
                .or(self.use_source_enum_member_names),
            license_header: other.license_header.or(self.license_header),
        }
    }
}

/// The HTTP pipeline and runtime library that generated clients target.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineGeneration {
    /// The legacy Azure runtime, with serializer adapters.
    AzureV1,
    /// The current Azure runtime.
    #[default]
    AzureV2,
    /// The `io.clientcore` runtime, which only supports
    /// synchronous clients.
    ClientCore,
}

impl PipelineGeneration {
    #[inline]
    pub fn is_azure(self) -> bool {
        matches!(self, Self::AzureV1 | Self::AzureV2)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AzureV1 => "azure-v1",
            Self::AzureV2 => "azure-v2",
            Self::ClientCore => "client-core",
        }
    }
}

impl Display for PipelineGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved, validated generator settings.
///
/// Settings are immutable once resolved, and are shared by reference
/// with every mapper and template.
#[derive(Clone, Debug)]
pub struct Settings {
    namespace: String,
    fluent: bool,
    data_plane_client: bool,
    generate_sync_methods: bool,
    generate_async_methods: bool,
    pipeline_generation: PipelineGeneration,
    custom_types: BTreeSet<String>,
    custom_types_subpackage: String,
    models_subpackage: String,
    implementation_subpackage: String,
    fluent_subpackage: String,
    use_client_logger: bool,
    use_source_enum_member_names: bool,
    license_header: Option<String>,
}

impl Settings {
    /// Applies defaults to the raw settings, and checks them for
    /// contradictions.
    pub fn resolve(raw: RawSettings) -> Result<Self, ConfigurationError> {
        let namespace = raw
            .namespace
            .map(|namespace| namespace.trim().to_owned())
            .filter(|namespace| !namespace.is_empty())
            .ok_or(ConfigurationError::Missing("namespace"))?;
        if !is_package_name(&namespace) {
            return Err(ConfigurationError::InvalidPackage {
                key: "namespace",
                value: namespace,
            });
        }

        let pipeline_generation = raw.pipeline_generation.unwrap_or_default();
        let fluent = raw.is_fluent.unwrap_or(false);
        let data_plane_client = raw.is_data_plane_client.unwrap_or(false);
        let generate_sync_methods = raw.generate_sync_methods.unwrap_or(true);
        // `client-core` only supports synchronous clients, so async methods
        // are off by default there.
        let generate_async_methods = raw
            .generate_async_methods
            .unwrap_or(pipeline_generation.is_azure());

        if fluent && data_plane_client {
            return Err(ConfigurationError::Conflict {
                first: "isFluent",
                first_value: "true",
                second: "isDataPlaneClient",
                second_value: "true",
            });
        }
        if !generate_sync_methods && !generate_async_methods {
            return Err(ConfigurationError::Conflict {
                first: "generateSyncMethods",
                first_value: "false",
                second: "generateAsyncMethods",
                second_value: "false",
            });
        }
        if pipeline_generation == PipelineGeneration::ClientCore {
            if generate_async_methods {
                return Err(ConfigurationError::Conflict {
                    first: "generateAsyncMethods",
                    first_value: "true",
                    second: "pipelineGeneration",
                    second_value: "client-core",
                });
            }
            if fluent {
                return Err(ConfigurationError::Conflict {
                    first: "isFluent",
                    first_value: "true",
                    second: "pipelineGeneration",
                    second_value: "client-core",
                });
            }
        }

        let subpackage = |key: &'static str, value: Option<String>, default: &str| {
            let value = value.unwrap_or_else(|| default.to_owned());
            if value.is_empty() || is_package_name(&value) {
                Ok(value)
            } else {
                Err(ConfigurationError::InvalidPackage { key, value })
            }
        };

        Ok(Self {
            custom_types_subpackage: subpackage(
                "customTypesSubpackage",
                raw.custom_types_subpackage,
                "",
            )?,
            models_subpackage: subpackage("modelsSubpackage", raw.models_subpackage, "models")?,
            implementation_subpackage: subpackage(
                "implementationSubpackage",
                raw.implementation_subpackage,
                "implementation",
            )?,
            fluent_subpackage: subpackage("fluentSubpackage", raw.fluent_subpackage, "fluent")?,
            namespace,
            fluent,
            data_plane_client,
            generate_sync_methods,
            generate_async_methods,
            pipeline_generation,
            custom_types: raw.custom_types.into_iter().flatten().collect(),
            use_client_logger: raw.use_client_logger.unwrap_or(true),
            use_source_enum_member_names: raw.use_source_enum_member_names.unwrap_or(false),
            license_header: raw.license_header.filter(|header| !header.trim().is_empty()),
        })
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn is_fluent(&self) -> bool {
        self.fluent
    }

    #[inline]
    pub fn is_data_plane_client(&self) -> bool {
        self.data_plane_client
    }

    #[inline]
    pub fn generate_sync_methods(&self) -> bool {
        self.generate_sync_methods
    }

    #[inline]
    pub fn generate_async_methods(&self) -> bool {
        self.generate_async_methods
    }

    #[inline]
    pub fn pipeline_generation(&self) -> PipelineGeneration {
        self.pipeline_generation
    }

    /// Returns `true` if `name` is a type that users write by hand,
    /// and that's placed in the custom types subpackage.
    #[inline]
    pub fn is_custom_type(&self, name: &str) -> bool {
        self.custom_types.contains(name)
    }

    #[inline]
    pub fn custom_types_subpackage(&self) -> &str {
        &self.custom_types_subpackage
    }

    #[inline]
    pub fn models_subpackage(&self) -> &str {
        &self.models_subpackage
    }

    #[inline]
    pub fn implementation_subpackage(&self) -> &str {
        &self.implementation_subpackage
    }

    #[inline]
    pub fn fluent_subpackage(&self) -> &str {
        &self.fluent_subpackage
    }

    #[inline]
    pub fn use_client_logger(&self) -> bool {
        self.use_client_logger
    }

    #[inline]
    pub fn use_source_enum_member_names(&self) -> bool {
        self.use_source_enum_member_names
    }

    #[inline]
    pub fn license_header(&self) -> Option<&str> {
        self.license_header.as_deref()
    }

    /// Joins the namespace and the non-empty subpackages into
    /// a package name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clientele_core::settings::{RawSettings, Settings};
    /// let settings = Settings::resolve(RawSettings {
    ///     namespace: Some("com.contoso.widgets".to_owned()),
    ///     ..Default::default()
    /// })
    /// .unwrap();
    /// assert_eq!(
    ///     settings.package(&["implementation", "models"]),
    ///     "com.contoso.widgets.implementation.models",
    /// );
    /// assert_eq!(settings.package(&["", "models"]), "com.contoso.widgets.models");
    /// ```
    pub fn package(&self, subpackages: &[&str]) -> String {
        self.package_in(None, subpackages)
    }

    /// Like [`Settings::package`], but rooted at `namespace` instead of
    /// the configured namespace, if it's set.
    pub fn package_in(&self, namespace: Option<&str>, subpackages: &[&str]) -> String {
        std::iter::once(namespace.unwrap_or(&self.namespace))
            .chain(subpackages.iter().copied())
            .filter(|segment| !segment.is_empty())
            .join(".")
    }
}
