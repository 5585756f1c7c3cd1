use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use nestforge_schema::DEFAULT_SCHEMA_FILE;

use crate::{
    config::{ConnectionArgs, GeneratorConfig, OutputArgs, PostProcessArgs},
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args, Clone)]
pub struct IntrospectCommand {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    /// Directory the schema document is written to
    #[arg(short, long, alias = "outputDir", default_value = "./build")]
    pub output_dir: PathBuf,

    /// Schema document path, relative to the output directory
    #[arg(long, default_value = DEFAULT_SCHEMA_FILE)]
    pub schema_file: PathBuf,
}

impl IntrospectCommand {
    pub async fn run(&self) -> Result<()> {
        let out = OutputArgs {
            output_dir: self.output_dir.clone(),
            components: Vec::new(),
            app: None,
            schema_file: self.schema_file.clone(),
            jobs: 1,
        };
        let config = GeneratorConfig::new(&self.conn, &out, PostProcessArgs::default());

        let (_, report) = ops::introspect(&config).await?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
