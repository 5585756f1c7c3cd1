use nestforge_core::DatabaseEngine;

use crate::ReaderError;

/// Connection parameters for a single introspection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub engine: DatabaseEngine,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Postgres on its default port, no credentials.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        let engine = DatabaseEngine::default();
        Self {
            engine,
            host: host.into(),
            port: engine.default_port(),
            database: database.into(),
            user: String::new(),
            password: None,
        }
    }

    pub fn engine(mut self, engine: DatabaseEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into()).filter(|p| !p.is_empty());
        self
    }

    /// `engine://user@host:port/database`, never including the password.
    pub fn display_target(&self) -> String {
        let user = if self.user.is_empty() {
            String::new()
        } else {
            format!("{}@", self.user)
        };
        format!(
            "{}://{}{}:{}/{}",
            self.engine.url_scheme(),
            user,
            self.host,
            self.port,
            self.database
        )
    }

    pub(crate) fn connection_error(&self, source: sqlx::Error) -> ReaderError {
        ReaderError::Connection {
            engine: self.engine,
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            source,
        }
    }
}
