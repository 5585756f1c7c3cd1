//! NestJS + TypeORM code generation for nestforge.
//!
//! Renders a web-service skeleton from a [`SchemaModel`](nestforge_schema::SchemaModel):
//!
//! ```ignore
//! use nestforge_codegen::{Component, Generator, ProjectSettings};
//! use nestforge_core::DatabaseEngine;
//! use nestforge_schema::SchemaModel;
//! use std::path::Path;
//!
//! let model = SchemaModel::load("build/db.reader.postgres.json")?;
//! let settings = ProjectSettings::new("opt-service", DatabaseEngine::Postgres);
//! let generator = Generator::new(&model, &settings);
//!
//! // Preview files without writing
//! let files = generator.preview(&Component::ALL);
//!
//! // Generate files to disk
//! let result = generator.generate(&Component::ALL, Path::new("build"))?;
//! ```
//!
//! # Generated Output
//!
//! - `src/app/entities/<table>.entity.ts` - TypeORM entities
//! - `src/app/<table>/<table>.{service,controller,dto,interface,module}.ts`
//! - `src/app/app.module.ts`, `src/main.ts`, `src/app/config/datasource.service.ts`
//! - `.env`, `package.json`, `README.md`
//! - `public/diagram.svg`, `public/diagram.png`
//!
//! Per-file output is built from the TypeScript nodes in [`ast`] and laid
//! out by [`builder`], never by string concatenation of whole files.

mod code_file;
mod component;
mod generator;
mod settings;

pub mod ast;
pub mod builder;
pub mod files;
pub mod naming;
pub mod type_mapper;
pub mod view;

pub use code_file::CodeFile;
pub use component::{Component, Selection};
pub use generator::{GenerateResult, Generator, PreviewFile};
pub use naming::{NEST_NAMING, NamingConvention};
pub use settings::ProjectSettings;
pub use type_mapper::{COLUMN_TYPES, Fallback, PrimitiveKind, TS_TYPES, TypeMapper, TypeTable};
