//! Supported database engines.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Database engine the schema is read from and the generated project targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    #[default]
    Postgres,
    Mysql,
}

impl DatabaseEngine {
    /// Get the lowercase string representation (also the TypeORM `type`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseEngine::Postgres => "postgres",
            DatabaseEngine::Mysql => "mysql",
        }
    }

    /// Conventional port for the engine.
    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseEngine::Postgres => 5432,
            DatabaseEngine::Mysql => 3306,
        }
    }

    /// URL scheme understood by the driver.
    pub fn url_scheme(&self) -> &'static str {
        match self {
            DatabaseEngine::Postgres => "postgres",
            DatabaseEngine::Mysql => "mysql",
        }
    }

    /// npm driver package the generated project depends on.
    pub fn driver_package(&self) -> (&'static str, &'static str) {
        match self {
            DatabaseEngine::Postgres => ("pg", "^8.11.3"),
            DatabaseEngine::Mysql => ("mysql2", "^3.9.1"),
        }
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatabaseEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DatabaseEngine::Postgres),
            "mysql" | "mariadb" => Ok(DatabaseEngine::Mysql),
            _ => Err(format!(
                "unsupported database type '{}', expected 'postgres' or 'mysql'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_as_str() {
        assert_eq!(DatabaseEngine::Postgres.as_str(), "postgres");
        assert_eq!(DatabaseEngine::Mysql.as_str(), "mysql");
    }

    #[test]
    fn test_engine_from_str() {
        assert_eq!("postgres".parse(), Ok(DatabaseEngine::Postgres));
        assert_eq!("PG".parse(), Ok(DatabaseEngine::Postgres));
        assert_eq!("MySQL".parse(), Ok(DatabaseEngine::Mysql));
        assert!("sqlite".parse::<DatabaseEngine>().is_err());
    }

    #[test]
    fn test_engine_default_is_postgres() {
        assert_eq!(DatabaseEngine::default(), DatabaseEngine::Postgres);
        assert_eq!(DatabaseEngine::default().default_port(), 5432);
    }

    #[test]
    fn test_engine_serde_lowercase() {
        let json = serde_json::to_string(&DatabaseEngine::Mysql).unwrap();
        assert_eq!(json, "\"mysql\"");
    }
}
