use clap::Args;
use eyre::Result;
use nestforge_schema::SchemaModel;
use tracing::info;

use super::{UnwrapOrExit, resolve_components};
use crate::{
    config::{ConnectionArgs, GeneratorConfig, OutputArgs, PostProcessArgs},
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args, Clone)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[command(flatten)]
    pub out: OutputArgs,

    #[command(flatten)]
    pub post: PostProcessArgs,

    /// Reuse the saved schema document instead of connecting to the database
    #[arg(long)]
    pub skip_introspection: bool,
}

impl GenerateCommand {
    pub async fn run(&self) -> Result<()> {
        let config = GeneratorConfig::new(&self.conn, &self.out, self.post);

        let model = if self.skip_introspection {
            let path = config.schema_path();
            info!(path = %path.display(), "loading schema document");
            SchemaModel::load(&path).unwrap_or_exit()
        } else {
            let (model, report) = ops::introspect(&config).await?;
            report.render(&mut TerminalOutput::new());
            println!();
            model
        };

        let (components, warnings) = resolve_components(&config.components)?;
        let report = ops::generate(
            &config,
            model,
            GenerateOptions {
                components: &components,
                dry_run: false,
                warnings,
            },
        )
        .await?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
