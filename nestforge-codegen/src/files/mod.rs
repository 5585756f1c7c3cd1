//! NestJS project file generators.

use std::path::{Path, PathBuf};

use crate::view::EntityNames;

mod app_module;
mod controller;
mod datasource;
mod diagram;
mod dto;
mod entity;
mod env;
mod interface;
mod main_ts;
mod module;
mod package_json;
mod readme;
mod scaffold;
mod service;

pub use app_module::AppModuleFile;
pub use controller::ControllerFile;
pub use datasource::DataSourceFile;
pub use diagram::{DiagramLayout, DiagramPng, DiagramSvg};
pub use dto::DtoFile;
pub use entity::EntityFile;
pub use env::EnvFile;
pub use interface::InterfaceFile;
pub use main_ts::MainTs;
pub use module::ModuleFile;
pub use package_json::{Dependency, PackageJson};
pub use readme::ReadmeFile;
pub use scaffold::scaffold_files;
pub use service::ServiceFile;

/// Root of the generated application sources.
pub(crate) fn app_dir(base: &Path) -> PathBuf {
    base.join("src").join("app")
}

/// `src/app/<slug>/<slug>.<kind>.ts`
pub(crate) fn table_file(base: &Path, names: &EntityNames, kind: &str) -> PathBuf {
    app_dir(base)
        .join(&names.slug)
        .join(format!("{}.{}.ts", names.slug, kind))
}
