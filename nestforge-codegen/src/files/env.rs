//! `.env` generator.

use std::path::{Path, PathBuf};

use nestforge_core::GeneratedFile;

use crate::ProjectSettings;

const DEFAULT_PORT: &str = "3001";
const SESSION_TOKEN_ENDPOINT: &str = "http://localhost:3000/session/verify";
const SESSION_HEALTH_ENDPOINT: &str = "http://localhost:3000/health";

/// `.env` with the connection the schema was read from.
pub struct EnvFile<'a> {
    settings: &'a ProjectSettings,
}

impl<'a> EnvFile<'a> {
    pub fn new(settings: &'a ProjectSettings) -> Self {
        Self { settings }
    }

    fn entries(&self) -> Vec<(&'static str, String)> {
        let s = self.settings;
        vec![
            ("DATABASE_HOST", s.host.clone()),
            ("DATABASE_PORT", s.port.to_string()),
            ("DATABASE_NAME", s.database.clone()),
            ("DATABASE_USER", s.user.clone()),
            ("DATABASE_PASSWORD", s.password.clone()),
            ("DATABASE_TYPE", s.engine.as_str().to_string()),
            ("ENDPOINT_SESSION_TOKEN", SESSION_TOKEN_ENDPOINT.to_string()),
            ("ENDPOINT_SESSION_HEALTHCHECK", SESSION_HEALTH_ENDPOINT.to_string()),
            ("MICROSERVICE_NAME", s.app_name.clone()),
            ("PORT", DEFAULT_PORT.to_string()),
        ]
    }
}

impl GeneratedFile for EnvFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(".env")
    }

    fn render(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(key, value)| format!("{}='{}'\n", key, value))
            .collect()
    }
}
