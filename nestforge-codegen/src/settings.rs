use nestforge_core::DatabaseEngine;

/// Application name and connection values embedded in project-level files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    pub app_name: String,
    pub engine: DatabaseEngine,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ProjectSettings {
    pub fn new(app_name: impl Into<String>, engine: DatabaseEngine) -> Self {
        Self {
            app_name: app_name.into(),
            engine,
            host: "localhost".to_string(),
            port: engine.default_port(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self::new("nestforge-app", DatabaseEngine::default())
    }
}
