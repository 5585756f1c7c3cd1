mod completions;
mod generate;
mod introspect;
mod render;

use std::io::IsTerminal;

use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use dialoguer::{MultiSelect, theme::ColorfulTheme};
use eyre::{Context, Result, bail};
use generate::GenerateCommand;
use introspect::IntrospectCommand;
use nestforge_codegen::{Component, Selection};
use render::RenderCommand;
use tracing::warn;

/// Extension trait for exiting on schema document errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for nestforge_schema::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Turn `-f/--generate` values into components.
///
/// Unknown names are skipped and returned as warnings, even when none of
/// the names is known. With no names at all, an interactive terminal gets
/// a checklist and anything else gets every component.
pub(crate) fn resolve_components(requested: &[String]) -> Result<(Vec<Component>, Vec<String>)> {
    let selection = Selection::parse(requested);
    let mut warnings: Vec<String> = selection
        .unknown
        .iter()
        .map(|name| format!("unknown component '{}' ignored", name))
        .collect();

    if selection.is_empty() && !selection.unknown.is_empty() {
        let valid: Vec<_> = Component::ALL.iter().map(|c| c.as_str()).collect();
        warnings.push(format!(
            "no known component selected, nothing is generated; choose from: all, {}",
            valid.join(", ")
        ));
    }
    for warning in &warnings {
        warn!("{}", warning);
    }

    if !selection.is_empty() || !selection.unknown.is_empty() {
        return Ok((selection.known, warnings));
    }
    if !std::io::stdin().is_terminal() {
        return Ok((Selection::all().known, warnings));
    }

    Ok((prompt_components()?, warnings))
}

fn prompt_components() -> Result<Vec<Component>> {
    let labels: Vec<String> = Component::ALL
        .iter()
        .map(|c| format!("{:<13} {}", c.as_str(), c.description()))
        .collect();
    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Components to generate")
        .items(&labels)
        .defaults(&vec![true; labels.len()])
        .interact()
        .wrap_err("component selection cancelled")?;
    if chosen.is_empty() {
        bail!("no component selected");
    }
    Ok(chosen.into_iter().map(|i| Component::ALL[i]).collect())
}

/// Without a subcommand, `nestforge [FLAGS]` runs `generate`.
///
/// `-h` is the database host, so help is only available as `--help`.
#[derive(Parser)]
#[command(name = "nestforge")]
#[command(version)]
#[command(about = "Generate NestJS + TypeORM services from a database schema")]
#[command(disable_help_flag = true, args_conflicts_with_subcommands = true)]
pub(crate) struct Cli {
    /// Print help
    #[arg(long, global = true, action = ArgAction::Help)]
    help: Option<bool>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateCommand,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Some(Commands::Generate(cmd)) => cmd.run().await,
            Some(Commands::Introspect(cmd)) => cmd.run().await,
            Some(Commands::Render(cmd)) => cmd.run().await,
            Some(Commands::Completions(cmd)) => cmd.run(),
            None => self.generate.run().await,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Introspect the database and generate the project (default)
    #[command(disable_help_flag = true)]
    Generate(GenerateCommand),

    /// Introspect the database and write the schema document only
    #[command(disable_help_flag = true)]
    Introspect(IntrospectCommand),

    /// Generate the project from an existing schema document
    #[command(disable_help_flag = true)]
    Render(RenderCommand),

    /// Generate shell completions
    #[command(disable_help_flag = true)]
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_flags_run_generate() {
        let cli = Cli::try_parse_from(["nestforge", "-h", "db", "-d", "shop", "-g", "entities"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.generate.conn.host, "db");
        assert_eq!(cli.generate.out.components, vec!["entities"]);
    }

    #[test]
    fn test_render_subcommand() {
        let cli = Cli::try_parse_from(["nestforge", "render", "--dry-run", "-o", "out"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Render(ref cmd)) if cmd.dry_run));
    }

    #[test]
    fn test_resolve_components_keeps_known_and_warns() {
        let requested = vec!["entities,bogus".to_string(), "dtos".to_string()];
        let (components, warnings) = resolve_components(&requested).unwrap();
        assert_eq!(components, vec![Component::Entities, Component::Dtos]);
        assert_eq!(warnings, vec!["unknown component 'bogus' ignored"]);
    }

    #[test]
    fn test_resolve_components_only_unknown_continues_empty() {
        let (components, warnings) = resolve_components(&["bogus".to_string()]).unwrap();
        assert!(components.is_empty());
        assert_eq!(warnings[0], "unknown component 'bogus' ignored");
        assert!(warnings[1].contains("choose from: all, entities"));
        assert!(warnings[1].contains("app-module"));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["nestforge", "introspect", "-vv", "-d", "shop"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
