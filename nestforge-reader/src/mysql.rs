use nestforge_core::DatabaseEngine;
use nestforge_schema::{Column, SchemaModel, Table};
use sqlx::{
    MySqlPool, Row,
    mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow},
};
use tracing::{debug, info};

use crate::{
    ConnectionConfig, ReaderError, Result, SchemaReader,
    catalog::{ForeignKeyRow, assemble_table, non_empty},
};

const TABLES_QUERY: &str = r#"
SELECT CAST(t.TABLE_NAME AS CHAR) AS table_name
FROM information_schema.TABLES t
WHERE t.TABLE_SCHEMA = ?
  AND t.TABLE_TYPE = 'BASE TABLE'
ORDER BY t.TABLE_NAME
"#;

const COLUMNS_QUERY: &str = r#"
SELECT
    CAST(c.COLUMN_NAME AS CHAR) AS column_name,
    CAST(c.DATA_TYPE AS CHAR) AS data_type,
    CAST(c.CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS character_maximum_length,
    CAST(c.IS_NULLABLE = 'YES' AS SIGNED) AS is_nullable,
    CAST(c.COLUMN_DEFAULT AS CHAR) AS column_default,
    CAST(c.COLUMN_COMMENT AS CHAR) AS column_comment,
    CAST(c.COLUMN_KEY = 'PRI' AS SIGNED) AS is_primary_key
FROM information_schema.COLUMNS c
WHERE c.TABLE_SCHEMA = ?
  AND c.TABLE_NAME = ?
ORDER BY c.ORDINAL_POSITION
"#;

const FOREIGN_KEYS_QUERY: &str = r#"
SELECT
    CAST(k.COLUMN_NAME AS CHAR) AS column_name,
    CAST(k.REFERENCED_TABLE_NAME AS CHAR) AS foreign_table_name,
    CAST(k.REFERENCED_COLUMN_NAME AS CHAR) AS foreign_column_name,
    CAST(EXISTS (
        SELECT 1
        FROM information_schema.STATISTICS s
        WHERE s.TABLE_SCHEMA = k.TABLE_SCHEMA
          AND s.TABLE_NAME = k.TABLE_NAME
          AND s.COLUMN_NAME = k.COLUMN_NAME
          AND s.NON_UNIQUE = 0
          AND s.INDEX_NAME <> 'PRIMARY'
    ) AS SIGNED) AS is_unique,
    CAST(EXISTS (
        SELECT 1
        FROM information_schema.KEY_COLUMN_USAGE p
        WHERE p.TABLE_SCHEMA = k.TABLE_SCHEMA
          AND p.TABLE_NAME = k.TABLE_NAME
          AND p.COLUMN_NAME = k.COLUMN_NAME
          AND p.CONSTRAINT_NAME = 'PRIMARY'
    ) AS SIGNED) AS is_primary_key
FROM information_schema.KEY_COLUMN_USAGE k
WHERE k.TABLE_SCHEMA = ?
  AND k.TABLE_NAME = ?
  AND k.REFERENCED_TABLE_NAME IS NOT NULL
ORDER BY k.ORDINAL_POSITION
"#;

/// Reads the configured database (schema) of a MySQL server.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlReader;

impl SchemaReader for MysqlReader {
    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::Mysql
    }

    async fn read_schema(&self, config: &ConnectionConfig) -> Result<SchemaModel> {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.database);
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        info!(url = %config.display_target(), "connecting");
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| config.connection_error(source))?;

        let tables = read_tables(&pool, &config.database).await;
        pool.close().await;
        let tables = tables?;

        info!(tables = tables.len(), "schema read");
        Ok(SchemaModel::new(&config.database, tables))
    }
}

async fn read_tables(pool: &MySqlPool, database: &str) -> Result<Vec<Table>> {
    let names: Vec<String> = sqlx::query(TABLES_QUERY)
        .bind(database)
        .fetch_all(pool)
        .await
        .and_then(|rows| {
            rows.iter()
                .map(|r| r.try_get::<String, _>("table_name"))
                .collect::<sqlx::Result<Vec<_>>>()
        })
        .map_err(|source| ReaderError::Tables {
            database: database.to_string(),
            source,
        })?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let table = read_table(pool, database, name).await?;
        debug!(
            table = %table.table_name,
            columns = table.columns.len(),
            relations = table.relations.len(),
            "read table"
        );
        tables.push(table);
    }
    Ok(tables)
}

async fn read_table(pool: &MySqlPool, database: &str, name: String) -> Result<Table> {
    let columns = sqlx::query(COLUMNS_QUERY)
        .bind(database)
        .bind(&name)
        .fetch_all(pool)
        .await
        .and_then(|rows| {
            rows.iter()
                .map(column_from_row)
                .collect::<sqlx::Result<Vec<_>>>()
        })
        .map_err(ReaderError::query(&name))?;

    let foreign_keys = sqlx::query(FOREIGN_KEYS_QUERY)
        .bind(database)
        .bind(&name)
        .fetch_all(pool)
        .await
        .and_then(|rows| {
            rows.iter()
                .map(foreign_key_from_row)
                .collect::<sqlx::Result<Vec<_>>>()
        })
        .map_err(ReaderError::query(&name))?;

    Ok(assemble_table(name, columns, foreign_keys))
}

/// MySQL comparisons yield integers; the queries cast them to BIGINT.
fn flag(row: &MySqlRow, column: &str) -> sqlx::Result<bool> {
    Ok(row.try_get::<i64, _>(column)? != 0)
}

fn column_from_row(row: &MySqlRow) -> sqlx::Result<Column> {
    Ok(Column {
        column_name: row.try_get("column_name")?,
        data_type: row.try_get("data_type")?,
        character_maximum_length: row.try_get("character_maximum_length")?,
        is_nullable: flag(row, "is_nullable")?,
        is_primary_key: flag(row, "is_primary_key")?,
        column_default: row.try_get("column_default")?,
        column_comment: non_empty(row.try_get("column_comment")?),
    })
}

fn foreign_key_from_row(row: &MySqlRow) -> sqlx::Result<ForeignKeyRow> {
    Ok(ForeignKeyRow {
        column_name: row.try_get("column_name")?,
        foreign_table_name: row.try_get("foreign_table_name")?,
        foreign_column_name: row.try_get("foreign_column_name")?,
        is_unique: flag(row, "is_unique")?,
        is_primary_key: flag(row, "is_primary_key")?,
    })
}
