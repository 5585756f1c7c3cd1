//! `package.json` generator.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use nestforge_core::{DatabaseEngine, GeneratedFile};
use serde_json::{Map, Value, json};

/// An npm dependency pinned to a version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub name: &'static str,
    pub version: &'static str,
}

const fn dep(name: &'static str, version: &'static str) -> Dependency {
    Dependency { name, version }
}

const RUNTIME: &[Dependency] = &[
    dep("@nestjs/axios", "^3.0.2"),
    dep("@nestjs/common", "10.2.10"),
    dep("@nestjs/config", "^3.1.1"),
    dep("@nestjs/core", "10.2.10"),
    dep("@nestjs/jwt", "^10.2.0"),
    dep("@nestjs/microservices", "10.2.10"),
    dep("@nestjs/passport", "^10.0.3"),
    dep("@nestjs/platform-express", "10.2.10"),
    dep("@nestjs/serve-static", "^4.0.1"),
    dep("@nestjs/swagger", "^7.2.0"),
    dep("@nestjs/typeorm", "^10.0.1"),
    dep("axios", "^1.6.7"),
    dep("class-transformer", "^0.5.1"),
    dep("class-validator", "^0.14.1"),
    dep("dotenv", "^16.4.1"),
    dep("passport", "^0.7.0"),
    dep("passport-jwt", "^4.0.1"),
    dep("reflect-metadata", "0.1.13"),
    dep("rimraf", "5.0.5"),
    dep("rxjs", "7.8.1"),
    dep("typeorm", "^0.3.20"),
];

const DEV: &[Dependency] = &[
    dep("@nestjs/cli", "10.3.0"),
    dep("@nestjs/schematics", "10.0.3"),
    dep("@nestjs/testing", "^10.2.10"),
    dep("@types/express", "4.17.21"),
    dep("@types/jest", "^29.5.12"),
    dep("@types/node", "20.8.7"),
    dep("@types/passport-jwt", "^4.0.1"),
    dep("@types/supertest", "2.0.16"),
    dep("@typescript-eslint/eslint-plugin", "5.62.0"),
    dep("@typescript-eslint/parser", "5.62.0"),
    dep("eslint", "8.42.0"),
    dep("eslint-config-prettier", "9.1.0"),
    dep("jest", "29.7.0"),
    dep("prettier", "^3.0.3"),
    dep("supertest", "6.3.3"),
    dep("ts-jest", "^29.1.2"),
    dep("ts-loader", "9.5.1"),
    dep("ts-node", "^10.9.1"),
    dep("tsconfig-paths", "4.2.0"),
    dep("typescript", "^5.3.3"),
];

const SCRIPTS: &[(&str, &str)] = &[
    ("prebuild", "rimraf dist"),
    ("build", "nest build"),
    ("format", "prettier --write \"src/**/*.ts\""),
    ("start", "nest start"),
    ("start:dev", "nest start --watch"),
    ("start:debug", "nest start --debug --watch"),
    ("start:prod", "node dist/main"),
    ("lint", "eslint \"{src,apps,libs,test}/**/*.ts\" --fix"),
    ("test", "jest"),
    ("test:watch", "jest --watch"),
    ("test:cov", "jest --coverage"),
];

/// `package.json` for the generated service. The database driver follows
/// the engine.
pub struct PackageJson {
    name: String,
    version: String,
    description: String,
    engine: DatabaseEngine,
}

impl PackageJson {
    pub fn new(name: impl Into<String>, engine: DatabaseEngine) -> Self {
        let name = name.into();
        Self {
            description: format!("{} NestJS service", name),
            name,
            version: "1.0.0".to_string(),
            engine,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Runtime dependencies, sorted by name.
    pub fn dependencies(&self) -> IndexMap<&'static str, &'static str> {
        let (driver, version) = self.engine.driver_package();
        let mut deps: IndexMap<_, _> = RUNTIME.iter().map(|d| (d.name, d.version)).collect();
        deps.insert(driver, version);
        deps.sort_keys();
        deps
    }

    pub fn dev_dependencies(&self) -> IndexMap<&'static str, &'static str> {
        DEV.iter().map(|d| (d.name, d.version)).collect()
    }

    fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "version": self.version,
            "description": self.description,
            "private": true,
            "scripts": string_map(SCRIPTS.iter().copied()),
            "dependencies": string_map(self.dependencies()),
            "devDependencies": string_map(self.dev_dependencies()),
        })
    }
}

fn string_map<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect::<Map<_, _>>(),
    )
}

impl GeneratedFile for PackageJson {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("package.json")
    }

    fn render(&self) -> String {
        format!("{:#}\n", self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_follows_engine() {
        let pg = PackageJson::new("opt-service", DatabaseEngine::Postgres);
        assert_eq!(pg.dependencies().get("pg"), Some(&"^8.11.3"));
        assert!(!pg.dependencies().contains_key("mysql2"));

        let mysql = PackageJson::new("opt-service", DatabaseEngine::Mysql);
        assert_eq!(mysql.dependencies().get("mysql2"), Some(&"^3.9.1"));
        assert!(!mysql.dependencies().contains_key("pg"));
    }

    #[test]
    fn test_dependencies_sorted() {
        let deps = PackageJson::new("svc", DatabaseEngine::Postgres).dependencies();
        let names: Vec<_> = deps.keys().copied().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_render_is_pretty_json() {
        let out = PackageJson::new("opt-service", DatabaseEngine::Postgres)
            .version("2.1.0")
            .render();
        assert!(out.starts_with("{\n  \"name\": \"opt-service\",\n  \"version\": \"2.1.0\",\n"));
        assert!(out.ends_with("}\n"));

        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["scripts"]["build"], "nest build");
        assert_eq!(parsed["dependencies"]["typeorm"], "^0.3.20");
        assert_eq!(parsed["devDependencies"]["prettier"], "^3.0.3");
    }
}
