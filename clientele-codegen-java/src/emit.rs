use std::{collections::BTreeMap, fmt::Display, path::Path};

use clientele_core::{
    codegen::{IntoCode, write_to_disk},
    error::GenerateError,
    ir::ApiSpec,
    mapper::{ClientModelBuilder, TypeMapper},
    model::ClientModel,
    parse::Document,
    settings::Settings,
};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use crate::{
    class::JavaModel,
    client::JavaServiceClient,
    enum_::JavaEnum,
    extension::TemplateExtensions,
    file::JavaFile,
    group::JavaMethodGroup,
    package_info::{JavaPackageInfo, PackageRole},
    template::Template,
};

/// A stage of a generation run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    MapTypes,
    BuildClientModel,
    RenderAll,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MapTypes => "map types",
            Self::BuildClientModel => "build client model",
            Self::RenderAll => "render",
        })
    }
}

/// Drives a generation run, from an API description to
/// a set of Java source files.
#[derive(Debug)]
pub struct Emitter<'a> {
    settings: &'a Settings,
    /// Additions to generated classes, keyed by fully qualified
    /// class name.
    extensions: IndexMap<String, TemplateExtensions>,
}

impl<'a> Emitter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            extensions: IndexMap::new(),
        }
    }

    /// Adds extra methods or declarations to the generated class with
    /// the given fully qualified name.
    pub fn with_extensions(
        mut self,
        class: impl Into<String>,
        extensions: TemplateExtensions,
    ) -> Self {
        self.extensions.insert(class.into(), extensions);
        self
    }

    /// Runs every stage. Any error aborts the run, so either every file
    /// is generated, or none are.
    pub fn generate(&self, doc: &Document) -> Result<GeneratedFiles, GenerateError> {
        let spec = ApiSpec::from_doc(doc)?;

        let types = TypeMapper::new(&spec, self.settings).map_all()?;
        info!(
            stage = %Stage::MapTypes,
            enums = types.types().enums().count(),
            models = types.types().models().count(),
            "Mapped types"
        );

        let model = ClientModelBuilder::new(&spec, self.settings, types).build()?;
        info!(
            stage = %Stage::BuildClientModel,
            clients = model.clients.len(),
            "Built client model"
        );

        let files = self.render(&model)?;
        info!(stage = %Stage::RenderAll, files = files.len(), "Rendered files");
        Ok(files)
    }

    /// Renders every enum, model, client, and method group, then
    /// a `package-info.java` for each package.
    pub fn render(&self, model: &ClientModel) -> Result<GeneratedFiles, GenerateError> {
        let settings = self.settings;
        let header = settings.license_header();
        let mut files = GeneratedFiles::default();
        let mut packages = IndexSet::new();

        let mut emit = |package: &str, name: &str, template: &dyn Template| {
            packages.insert(package.to_owned());
            let file = JavaFile::new(package, name, template.render()).with_header(header);
            debug!(path = %file.path(), "Rendered file");
            files.insert(file)
        };

        for (_, ty) in model.types.enums() {
            emit(&ty.package, &ty.name, &JavaEnum::new(ty, settings))?;
        }
        for (_, class, def) in model.types.models() {
            let template = JavaModel::new(&model.types, class, def, settings)
                .with_extensions(self.extensions.get(&class.qualified_name()));
            emit(&class.package, &class.name, &template)?;
        }
        for client in &model.clients {
            let qualified = format!("{}.{}", client.package, client.class_name);
            let template = JavaServiceClient::new(model, client, settings)
                .with_extensions(self.extensions.get(&qualified));
            emit(&client.package, &client.class_name, &template)?;

            for group in &client.method_groups {
                let qualified = format!("{}.{}", group.package, group.class_name);
                let template = JavaMethodGroup::new(&model.types, group, client, settings)
                    .with_extensions(self.extensions.get(&qualified));
                emit(&group.package, &group.class_name, &template)?;
            }
        }

        for package in &packages {
            let info = JavaPackageInfo::new(&model.title, self.package_role(package));
            let file = JavaFile::new(package, "package-info", info.render()).with_header(header);
            files.insert(file)?;
        }
        Ok(files)
    }

    fn package_role(&self, package: &str) -> PackageRole {
        let last = package.rsplit('.').next().unwrap_or(package);
        if last == self.settings.implementation_subpackage() {
            PackageRole::Implementation
        } else if last == self.settings.models_subpackage() {
            PackageRole::Models
        } else {
            PackageRole::Classes
        }
    }
}

/// Generated files, keyed and ordered by their path.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GeneratedFiles(BTreeMap<String, String>);

impl GeneratedFiles {
    /// Adds a file. Two files with the same path are an error, because
    /// one would overwrite the other.
    pub fn insert(&mut self, file: impl IntoCode<Code = (String, String)>) -> Result<(), GenerateError> {
        let (path, contents) = file.into_code();
        if self.0.contains_key(&path) {
            return Err(GenerateError::DuplicateFile(path));
        }
        self.0.insert(path, contents);
        Ok(())
    }

    #[inline]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(path, contents)| (path.as_str(), contents.as_str()))
    }

    /// Writes every file under `output`.
    pub fn write_to_disk(&self, output: &Path) -> miette::Result<()> {
        for file in self.iter() {
            write_to_disk(output, file)?;
        }
        Ok(())
    }
}
