use nestforge_core::DatabaseEngine;
use nestforge_schema::{Column, SchemaModel, Table};
use sqlx::{
    PgPool, Row,
    postgres::{PgConnectOptions, PgPoolOptions, PgRow},
};
use tracing::{debug, info};

use crate::{
    ConnectionConfig, ReaderError, Result, SchemaReader,
    catalog::{ForeignKeyRow, assemble_table},
};

const SCHEMA: &str = "public";

const TABLES_QUERY: &str = r#"
SELECT t.table_name::text AS table_name
FROM information_schema.tables t
WHERE t.table_schema = $1
  AND t.table_type = 'BASE TABLE'
ORDER BY t.table_name
"#;

const COLUMNS_QUERY: &str = r#"
SELECT
    c.column_name::text AS column_name,
    c.data_type::text AS data_type,
    c.character_maximum_length::int8 AS character_maximum_length,
    (c.is_nullable = 'YES') AS is_nullable,
    c.column_default::text AS column_default,
    col_description(
        format('%I.%I', c.table_schema, c.table_name)::regclass,
        c.ordinal_position::int
    ) AS column_comment,
    EXISTS (
        SELECT 1
        FROM information_schema.table_constraints tc
        JOIN information_schema.key_column_usage kcu
          ON kcu.constraint_name = tc.constraint_name
         AND kcu.table_schema = tc.table_schema
         AND kcu.table_name = tc.table_name
        WHERE tc.constraint_type = 'PRIMARY KEY'
          AND tc.table_schema = c.table_schema
          AND tc.table_name = c.table_name
          AND kcu.column_name = c.column_name
    ) AS is_primary_key
FROM information_schema.columns c
WHERE c.table_schema = $1
  AND c.table_name = $2
ORDER BY c.ordinal_position
"#;

const FOREIGN_KEYS_QUERY: &str = r#"
SELECT
    kcu.column_name::text AS column_name,
    ccu.table_name::text AS foreign_table_name,
    ccu.column_name::text AS foreign_column_name,
    EXISTS (
        SELECT 1
        FROM information_schema.table_constraints utc
        JOIN information_schema.key_column_usage ukcu
          ON ukcu.constraint_name = utc.constraint_name
         AND ukcu.table_schema = utc.table_schema
        WHERE utc.constraint_type = 'UNIQUE'
          AND utc.table_schema = tc.table_schema
          AND utc.table_name = tc.table_name
          AND ukcu.column_name = kcu.column_name
    ) AS is_unique,
    EXISTS (
        SELECT 1
        FROM information_schema.table_constraints ptc
        JOIN information_schema.key_column_usage pkcu
          ON pkcu.constraint_name = ptc.constraint_name
         AND pkcu.table_schema = ptc.table_schema
        WHERE ptc.constraint_type = 'PRIMARY KEY'
          AND ptc.table_schema = tc.table_schema
          AND ptc.table_name = tc.table_name
          AND pkcu.column_name = kcu.column_name
    ) AS is_primary_key
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage kcu
  ON kcu.constraint_name = tc.constraint_name
 AND kcu.table_schema = tc.table_schema
JOIN information_schema.constraint_column_usage ccu
  ON ccu.constraint_name = tc.constraint_name
 AND ccu.table_schema = tc.table_schema
WHERE tc.constraint_type = 'FOREIGN KEY'
  AND tc.table_schema = $1
  AND tc.table_name = $2
ORDER BY kcu.ordinal_position
"#;

/// Reads the `public` schema of a PostgreSQL database.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresReader;

impl SchemaReader for PostgresReader {
    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::Postgres
    }

    async fn read_schema(&self, config: &ConnectionConfig) -> Result<SchemaModel> {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.database);
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        info!(url = %config.display_target(), "connecting");
        let pool = PgPoolOptions::new()
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

async fn read_tables(pool: &PgPool, database: &str) -> Result<Vec<Table>> {
    let names: Vec<String> = sqlx::query(TABLES_QUERY)
        .bind(SCHEMA)
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
        let table = read_table(pool, name).await?;
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

async fn read_table(pool: &PgPool, name: String) -> Result<Table> {
    let columns = sqlx::query(COLUMNS_QUERY)
        .bind(SCHEMA)
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
        .bind(SCHEMA)
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

fn column_from_row(row: &PgRow) -> sqlx::Result<Column> {
    Ok(Column {
        column_name: row.try_get("column_name")?,
        data_type: row.try_get("data_type")?,
        character_maximum_length: row.try_get("character_maximum_length")?,
        is_nullable: row.try_get("is_nullable")?,
        is_primary_key: row.try_get("is_primary_key")?,
        column_default: row.try_get("column_default")?,
        column_comment: row.try_get("column_comment")?,
    })
}

fn foreign_key_from_row(row: &PgRow) -> sqlx::Result<ForeignKeyRow> {
    Ok(ForeignKeyRow {
        column_name: row.try_get("column_name")?,
        foreign_table_name: row.try_get("foreign_table_name")?,
        foreign_column_name: row.try_get("foreign_column_name")?,
        is_unique: row.try_get("is_unique")?,
        is_primary_key: row.try_get("is_primary_key")?,
    })
}
