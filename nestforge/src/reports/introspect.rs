//! Introspect command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Summary of a schema read.
#[derive(Debug)]
pub struct IntrospectReport {
    /// `engine://user@host:port/database`, without the password.
    pub target: String,
    pub project_name: String,
    /// Table name with its column and relation counts.
    pub tables: Vec<(String, usize, usize)>,
    /// Where the schema document was saved.
    pub schema_path: PathBuf,
}

impl Report for IntrospectReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.project_name);
        out.key_value("Source", &self.target);
        out.newline();

        out.section(&format!("Tables ({})", self.tables.len()));
        for (name, columns, relations) in &self.tables {
            let line = match relations {
                0 => format!("{} ({} columns)", name, columns),
                n => format!("{} ({} columns, {} relations)", name, columns, n),
            };
            out.list_item(&line);
        }
        out.newline();

        out.key_value("Schema", &self.schema_path.display().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_introspect_report() {
        let report = IntrospectReport {
            target: "postgres://postgres@localhost:5432/opt_db".into(),
            project_name: "OptDb".into(),
            tables: vec![("tb_optin".into(), 4, 0), ("tb_optout".into(), 4, 1)],
            schema_path: PathBuf::from("build/db.reader.postgres.json"),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        insta::assert_snapshot!(out.text(), @r"
        # OptDb
        Source: postgres://postgres@localhost:5432/opt_db

        Tables (2):
          - tb_optin (4 columns)
          - tb_optout (4 columns, 1 relations)

        Schema: build/db.reader.postgres.json
        ");
    }
}
