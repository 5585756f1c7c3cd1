use miette::Diagnostic;
use nestforge_core::DatabaseEngine;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReaderError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ReaderError {
    #[error("failed to connect to {engine} database '{database}' at {host}:{port}")]
    #[diagnostic(
        code(nestforge::connection_error),
        help("check --host/--port/--user/--password or DB_HOST, DB_PORT, DB_USER, DB_PASSWORD")
    )]
    Connection {
        engine: DatabaseEngine,
        host: String,
        port: u16,
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to list tables of '{database}'")]
    #[diagnostic(code(nestforge::catalog_error))]
    Tables {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to read catalog metadata for table '{table}'")]
    #[diagnostic(code(nestforge::catalog_error))]
    Query {
        table: String,
        #[source]
        source: sqlx::Error,
    },
}

impl ReaderError {
    pub(crate) fn query(table: &str) -> impl FnOnce(sqlx::Error) -> Self + '_ {
        move |source| ReaderError::Query {
            table: table.to_string(),
            source,
        }
    }
}
