//! Core utilities and types for nestforge.
//!
//! This crate provides the pieces every other nestforge crate leans on:
//! identifier normalization, the supported database engines, and the
//! write contract shared by all generated files.

mod engine;
mod file;
mod naming;

pub use engine::DatabaseEngine;
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
pub use naming::{
    TABLE_PREFIX, normalize_catalog_identifier, project_name, strip_table_prefix, to_camel_case,
    to_kebab_case, to_pascal_case, to_snake_from_camel,
};
