//! NestJS project generator over a schema model.

use std::path::Path;

use eyre::{Context, Result};
use nestforge_core::{GeneratedFile, WriteResult};
use nestforge_schema::SchemaModel;
use tracing::debug;

use crate::{
    Component, ProjectSettings,
    files::{
        AppModuleFile, ControllerFile, DataSourceFile, DiagramPng, DiagramSvg, DtoFile, EntityFile,
        EnvFile, InterfaceFile, MainTs, ModuleFile, PackageJson, ReadmeFile, ServiceFile,
    },
    naming::{NEST_NAMING, NamingConvention},
    type_mapper::TypeMapper,
    view::{EntityNames, TableView},
};

/// A file that would be generated, for dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from the output directory.
    pub path: String,
    /// File content, or a placeholder for binary files.
    pub content: String,
}

/// Paths touched by a generation run, relative to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResult {
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
    pub skipped: Vec<String>,
}

impl GenerateResult {
    pub fn record(&mut self, path: String, result: WriteResult) {
        match result {
            WriteResult::Written => self.written.push(path),
            WriteResult::Unchanged => self.unchanged.push(path),
            WriteResult::Skipped => self.skipped.push(path),
        }
    }

    pub fn merge(&mut self, other: GenerateResult) {
        self.written.extend(other.written);
        self.unchanged.extend(other.unchanged);
        self.skipped.extend(other.skipped);
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.skipped.len()
    }
}

/// Generates NestJS sources for every table of a [`SchemaModel`].
///
/// The model is never mutated, so one generator (or several sharing the
/// model) can run components independently. Each component writes a
/// disjoint set of paths.
pub struct Generator<'a> {
    model: &'a SchemaModel,
    settings: &'a ProjectSettings,
    mapper: TypeMapper,
    naming: NamingConvention,
}

impl<'a> Generator<'a> {
    pub fn new(model: &'a SchemaModel, settings: &'a ProjectSettings) -> Self {
        Self {
            model,
            settings,
            mapper: TypeMapper::default(),
            naming: NEST_NAMING,
        }
    }

    pub fn with_type_mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// Problems that don't stop generation but leave the output incomplete.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .model
            .dangling_relations()
            .into_iter()
            .map(|d| {
                format!(
                    "relation {}.{} targets table '{}' which is not in the schema",
                    d.table, d.column, d.foreign_table
                )
            })
            .collect();
        warnings.extend(
            self.model
                .tables()
                .iter()
                .filter(|t| !t.has_external_id())
                .map(|t| {
                    format!(
                        "table '{}' has no external_id column; its service looks rows up by external id",
                        t.table_name
                    )
                }),
        );
        warnings
    }

    fn views(&self) -> Vec<TableView<'a>> {
        self.model
            .tables()
            .iter()
            .map(|t| TableView::new(t, &self.naming, &self.mapper))
            .collect()
    }

    fn names(&self) -> Vec<EntityNames> {
        self.model
            .tables()
            .iter()
            .map(|t| EntityNames::new(&t.table_name, &self.naming))
            .collect()
    }

    /// Files produced by one component.
    pub fn files(&self, component: Component) -> Vec<Box<dyn GeneratedFile + 'a>> {
        let naming = self.naming;
        let mapper = self.mapper;
        match component {
            Component::Entities => boxed(
                self.views()
                    .into_iter()
                    .map(|v| EntityFile::new(v, naming, mapper)),
            ),
            Component::Services => boxed(self.views().into_iter().map(ServiceFile::new)),
            Component::Interfaces => boxed(self.views().into_iter().map(InterfaceFile::new)),
            Component::Controllers => boxed(self.names().into_iter().map(ControllerFile::new)),
            Component::Dtos => boxed(self.views().into_iter().map(DtoFile::new)),
            Component::Modules => boxed(self.names().into_iter().map(ModuleFile::new)),
            Component::AppModule => vec![Box::new(AppModuleFile::new(self.names()))],
            Component::Main => vec![Box::new(MainTs::new(&self.settings.app_name))],
            Component::Env => vec![Box::new(EnvFile::new(self.settings))],
            Component::PackageJson => vec![Box::new(PackageJson::new(
                &self.settings.app_name,
                self.settings.engine,
            ))],
            Component::Readme => vec![Box::new(ReadmeFile::new(self.model))],
            Component::Datasource => vec![Box::new(DataSourceFile::new(
                self.settings.engine,
                self.names(),
            ))],
            Component::Diagram => vec![
                Box::new(DiagramSvg::new(self.model)) as Box<dyn GeneratedFile + 'a>,
                Box::new(DiagramPng::new(self.model)),
            ],
        }
    }

    /// Render the selected components without touching the disk.
    pub fn preview(&self, components: &[Component]) -> Vec<PreviewFile> {
        components
            .iter()
            .flat_map(|c| self.files(*c))
            .map(|file| PreviewFile {
                path: relative_path(file.as_ref()),
                content: if file.is_binary() {
                    "<binary file>".to_string()
                } else {
                    file.render()
                },
            })
            .collect()
    }

    /// Write one component's files under `output_dir`.
    pub fn generate_component(
        &self,
        component: Component,
        output_dir: &Path,
    ) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        for file in self.files(component) {
            let path = relative_path(file.as_ref());
            let outcome = file
                .write(output_dir)
                .wrap_err_with(|| format!("failed to generate {} ({})", path, component))?;
            debug!(component = %component, path = %path, ?outcome, "file");
            result.record(path, outcome);
        }
        Ok(result)
    }

    /// Write every selected component, in order.
    pub fn generate(&self, components: &[Component], output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        for component in components {
            result.merge(self.generate_component(*component, output_dir)?);
        }
        Ok(result)
    }
}

fn boxed<'a, F>(files: impl Iterator<Item = F>) -> Vec<Box<dyn GeneratedFile + 'a>>
where
    F: GeneratedFile + 'a,
{
    files
        .map(|f| Box::new(f) as Box<dyn GeneratedFile + 'a>)
        .collect()
}

fn relative_path(file: &dyn GeneratedFile) -> String {
    file.path(Path::new(""))
        .to_string_lossy()
        .replace('\\', "/")
}
