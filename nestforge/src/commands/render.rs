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
pub struct RenderCommand {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[command(flatten)]
    pub out: OutputArgs,

    #[command(flatten)]
    pub post: PostProcessArgs,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderCommand {
    pub async fn run(&self) -> Result<()> {
        let config = GeneratorConfig::new(&self.conn, &self.out, self.post);

        let path = config.schema_path();
        info!(path = %path.display(), "loading schema document");
        let model = SchemaModel::load(&path).unwrap_or_exit();

        let (components, warnings) = resolve_components(&config.components)?;
        let report = ops::generate(
            &config,
            model,
            GenerateOptions {
                components: &components,
                dry_run: self.dry_run,
                warnings,
            },
        )
        .await?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
