//! Read the live schema and save it as the schema document.

use eyre::{Context, Result};
use nestforge_reader::read_schema;
use nestforge_schema::SchemaModel;
use tracing::{error, info};

use crate::{config::GeneratorConfig, reports::IntrospectReport};

/// Introspect the configured database and save the schema document.
///
/// Returns the model together with a report of what was read.
pub async fn introspect(config: &GeneratorConfig) -> Result<(SchemaModel, IntrospectReport)> {
    let connection = config.connection()?;
    let target = connection.display_target();

    let model = match read_schema(&connection).await {
        Ok(model) => model,
        Err(e) => {
            error!(url = %target, "introspection failed");
            return Err(e).wrap_err_with(|| format!("failed to read schema from {}", target));
        }
    };
    info!(tables = model.tables().len(), "schema read");

    let schema_path = config.schema_path();
    model
        .save(&schema_path)
        .wrap_err("failed to save schema document")?;
    info!(path = %schema_path.display(), "schema document saved");

    let report = IntrospectReport {
        target,
        project_name: model.project_name.clone(),
        tables: model
            .tables()
            .iter()
            .map(|t| (t.table_name.clone(), t.columns.len(), t.relations.len()))
            .collect(),
        schema_path,
    };
    Ok((model, report))
}
