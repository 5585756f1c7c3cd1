//! Schema model for nestforge.
//!
//! The schema document is the boundary between introspection and code
//! generation:
//!
//! ```text
//! database → nestforge-reader → SchemaModel (JSON document) → nestforge-codegen
//! ```
//!
//! The document shape is `{ databaseName, projectName, schema: Table[] }`
//! with camelCase keys, so any producer or consumer honoring that shape can
//! be swapped in.

mod document;
mod error;
mod model;

pub use document::DEFAULT_SCHEMA_FILE;
pub use error::{Error, Result};
pub use model::{
    Column, DanglingRelation, EXTERNAL_ID, Relation, RelationType, SchemaModel, Table,
};
