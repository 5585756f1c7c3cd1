//! Database catalog introspection.
//!
//! Reads tables, columns and foreign keys from PostgreSQL or MySQL and
//! assembles a [`SchemaModel`]. Each read holds exactly one connection,
//! released on every path before the result is returned.
//!
//! # Example
//!
//! ```ignore
//! use nestforge_reader::{ConnectionConfig, read_schema};
//!
//! let config = ConnectionConfig::new("localhost", "shop").user("postgres");
//! let model = read_schema(&config).await?;
//! model.save("build/db.reader.postgres.json")?;
//! ```

mod catalog;
mod config;
mod error;
mod inference;
mod mysql;
mod postgres;

use std::future::Future;

use nestforge_core::DatabaseEngine;
use nestforge_schema::SchemaModel;

pub use config::ConnectionConfig;
pub use error::{ReaderError, Result};
pub use inference::infer_relation_type;
pub use mysql::MysqlReader;
pub use postgres::PostgresReader;

/// A catalog reader for one database engine.
pub trait SchemaReader {
    /// Engine this reader understands.
    fn engine(&self) -> DatabaseEngine;

    /// Read every table of the configured schema.
    ///
    /// Any failure aborts the whole read; no partial model is returned.
    fn read_schema(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<SchemaModel>> + Send;
}

/// Read the schema using the reader matching `config.engine`.
pub async fn read_schema(config: &ConnectionConfig) -> Result<SchemaModel> {
    match config.engine {
        DatabaseEngine::Postgres => PostgresReader.read_schema(config).await,
        DatabaseEngine::Mysql => MysqlReader.read_schema(config).await,
    }
}
