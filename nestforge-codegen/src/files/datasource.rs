//! TypeORM data source generator.

use std::path::{Path, PathBuf};

use nestforge_core::{DatabaseEngine, GeneratedFile};

use super::app_dir;
use crate::{
    ast::{Class, Decorator, Import, JsArray, JsObject, Method, Param, Property, ts_string},
    code_file::CodeFile,
    view::EntityNames,
};

/// `src/app/config/datasource.service.ts`: one DataSource with every entity.
pub struct DataSourceFile {
    engine: DatabaseEngine,
    entities: Vec<EntityNames>,
}

impl DataSourceFile {
    pub fn new(engine: DatabaseEngine, entities: Vec<EntityNames>) -> Self {
        Self { engine, entities }
    }

    fn options(&self) -> JsObject {
        let env = |ty: &str, key: &str| format!("env.getEnv().get<{}>({})", ty, ts_string(key));
        JsObject::new()
            .string("type", self.engine.as_str())
            .raw("host", env("string", "DATABASE_HOST"))
            .raw("port", env("number", "DATABASE_PORT"))
            .raw("database", env("string", "DATABASE_NAME"))
            .raw("username", env("string", "DATABASE_USER"))
            .raw("password", env("string", "DATABASE_PASSWORD"))
            .array(
                "entities",
                JsArray::from_raw(self.entities.iter().map(EntityNames::entity)),
            )
            .raw("synchronize", "false")
            .raw("logging", "true")
            .raw_if(
                self.engine == DatabaseEngine::Postgres,
                "ssl",
                "{ rejectUnauthorized: false }",
            )
    }

    fn class(&self) -> Class {
        Class::new("DataSourceService")
            .decorator(Decorator::new("Injectable"))
            .property(Property::new("dataSource", "DataSource").modifiers("private readonly"))
            .method(
                Method::constructor()
                    .param(Param::new("env", "EnvironmentService"))
                    .body([self.options().to_block("this.dataSource = new DataSource(", ");")]),
            )
            .method(
                Method::new("getDataSource")
                    .returns("DataSource")
                    .body_line("return this.dataSource;"),
            )
    }
}

impl GeneratedFile for DataSourceFile {
    fn path(&self, base: &Path) -> PathBuf {
        app_dir(base).join("config").join("datasource.service.ts")
    }

    fn render(&self) -> String {
        let mut file = CodeFile::new()
            .import(Import::new("reflect-metadata"))
            .import(Import::new("typeorm").named("DataSource"))
            .import(Import::new("@nestjs/common").named("Injectable"))
            .import(Import::new("./environment.service").named("EnvironmentService"));
        for entity in &self.entities {
            file = file.import(
                Import::new(format!("../entities/{}.entity", entity.slug)).named(entity.entity()),
            );
        }
        file.add(self.class()).render()
    }
}
