//! Loading and saving the schema document.

use std::{collections::HashSet, path::Path, str::FromStr};

use crate::{Error, Result, SchemaModel};

/// Default file name of the schema document.
pub const DEFAULT_SCHEMA_FILE: &str = "db.reader.postgres.json";

impl FromStr for SchemaModel {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, DEFAULT_SCHEMA_FILE)
    }
}

impl SchemaModel {
    /// Load a schema document from the given path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a schema document with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let model: Self =
            serde_json::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        model.validate(content, filename)?;
        Ok(model)
    }

    /// Serialize to pretty JSON (2-space indent, trailing newline).
    pub fn to_json_string(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| Box::new(Error::Serialize { source: e }))?;
        json.push('\n');
        Ok(json)
    }

    /// Write the document, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        let write_err = |e| {
            Box::new(Error::Write {
                path: path.to_path_buf(),
                source: e,
            })
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, json).map_err(write_err)
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        for table in &self.schema {
            let mut seen = HashSet::new();
            for column in &table.columns {
                if !seen.insert(column.column_name.as_str()) {
                    return Err(Error::duplicate_column(
                        &table.table_name,
                        &column.column_name,
                        src,
                        filename,
                    ));
                }
            }
        }
        Ok(())
    }
}
