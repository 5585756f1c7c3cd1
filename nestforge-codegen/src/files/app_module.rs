//! Root application module generator.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;

use super::app_dir;
use crate::{
    ast::{Import, JsObject},
    builder::CodeFragment,
    code_file::CodeFile,
    view::EntityNames,
};

/// Modules every generated application registers before the table modules.
const INFRASTRUCTURE: &[(&str, &str)] = &[
    ("EnvironmentModule", "./config/environment.module"),
    ("DataSourceModule", "./config/datasource.module"),
    ("VersionModule", "./version/version.module"),
    ("JwtAuthGuardModule", "./middleware/jwt-auth.guard.module"),
    ("HealthModule", "./health/health.module"),
];

/// `src/app/app.module.ts`.
pub struct AppModuleFile {
    tables: Vec<EntityNames>,
}

impl AppModuleFile {
    pub fn new(tables: Vec<EntityNames>) -> Self {
        Self { tables }
    }

    fn imports_array(&self) -> CodeFragment {
        let config = JsObject::new().raw("isGlobal", "true").raw(
            "envFilePath",
            "process.env.NODE_ENV === 'test' ? '.env.test' : '.env'",
        );
        let serve_static = JsObject::new().raw("rootPath", "join(__dirname, '..', '..', 'public')");

        let mut entries = vec![
            config.to_block("ConfigModule.forRoot(", "),"),
            serve_static.to_block("ServeStaticModule.forRoot(", "),"),
        ];
        entries.extend(
            INFRASTRUCTURE
                .iter()
                .map(|(name, _)| CodeFragment::line(format!("{},", name))),
        );
        entries.extend(
            self.tables
                .iter()
                .map(|t| CodeFragment::line(format!("{},", t.module()))),
        );
        CodeFragment::block("imports: [", entries, Some("],".to_string()))
    }
}

impl GeneratedFile for AppModuleFile {
    fn path(&self, base: &Path) -> PathBuf {
        app_dir(base).join("app.module.ts")
    }

    fn render(&self) -> String {
        let mut file = CodeFile::new()
            .import(Import::new("path").named("join"))
            .import(Import::new("@nestjs/common").named("Module"))
            .import(Import::new("@nestjs/config").named("ConfigModule"))
            .import(Import::new("@nestjs/serve-static").named("ServeStaticModule"));
        for (name, from) in INFRASTRUCTURE {
            file = file.import(Import::new(*from).named(*name));
        }
        for table in &self.tables {
            file = file.import(Import::new(table.app_import("module")).named(table.module()));
        }

        file.add(vec![
            CodeFragment::block("@Module({", vec![self.imports_array()], Some("})".to_string())),
            CodeFragment::line("export class AppModule {}"),
        ])
        .render()
    }
}
