//! Post-processing of a generated project.
//!
//! Failures here never abort the run; each step is logged and reported.

use std::path::Path;

use eyre::{Context, Result, bail};
use nestforge_codegen::files::scaffold_files;
use nestforge_core::{GeneratedFile, WriteResult};
use tokio::process::Command;
use tracing::{info, warn};

use crate::{config::PostProcessOptions, reports::StepOutcome};

/// Run the enabled steps in order: scaffold, format, install.
///
/// When install is enabled `node_modules` is removed before formatting, so
/// the formatter never walks a stale dependency tree.
pub async fn postprocess(output_dir: &Path, opts: PostProcessOptions) -> Vec<StepOutcome> {
    let mut steps = Vec::with_capacity(3);

    steps.push(if opts.scaffold {
        finish("scaffold", scaffold(output_dir))
    } else {
        StepOutcome::skipped("scaffold")
    });

    let cleaned = if opts.install {
        remove_node_modules(output_dir).await
    } else {
        Ok(())
    };

    steps.push(if opts.format {
        finish(
            "format",
            run_tool("npx", &["prettier", "--write", "src"], output_dir)
                .await
                .map(|()| "prettier --write src".to_string()),
        )
    } else {
        StepOutcome::skipped("format")
    });

    steps.push(if opts.install {
        let result = match cleaned {
            Ok(()) => install(output_dir).await,
            Err(e) => Err(e),
        };
        finish("install", result)
    } else {
        StepOutcome::skipped("install")
    });

    steps
}

fn finish(name: &'static str, result: Result<String>) -> StepOutcome {
    match result {
        Ok(detail) => {
            info!(step = name, "{}", detail);
            StepOutcome::done(name, detail)
        }
        Err(e) => {
            warn!(step = name, "{:#}", e);
            StepOutcome::failed(name, format!("{:#}", e))
        }
    }
}

/// Create the static scaffold files that do not exist yet.
fn scaffold(output_dir: &Path) -> Result<String> {
    let mut created = 0;
    for file in scaffold_files() {
        let outcome = file
            .write(output_dir)
            .wrap_err_with(|| format!("failed to write {}", file.relative_path().display()))?;
        if outcome == WriteResult::Written {
            created += 1;
        }
    }
    Ok(format!("{} files created", created))
}

async fn remove_node_modules(output_dir: &Path) -> Result<()> {
    let node_modules = output_dir.join("node_modules");
    if tokio::fs::try_exists(&node_modules).await.unwrap_or(false) {
        info!(path = %node_modules.display(), "removing node_modules");
        tokio::fs::remove_dir_all(&node_modules)
            .await
            .wrap_err("failed to remove node_modules")?;
    }
    Ok(())
}

async fn install(output_dir: &Path) -> Result<String> {
    run_tool("npm", &["install"], output_dir).await?;
    Ok("npm install".to_string())
}

async fn run_tool(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .await
        .wrap_err_with(|| format!("failed to run {}", program))?;
    if !status.success() {
        bail!("{} {} exited with {}", program, args.join(" "), status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const SCAFFOLD_ONLY: PostProcessOptions = PostProcessOptions {
        scaffold: true,
        format: false,
        install: false,
    };

    #[tokio::test]
    async fn test_scaffold_only() {
        let temp = TempDir::new().unwrap();
        let steps = postprocess(temp.path(), SCAFFOLD_ONLY).await;

        let expected = format!("{} files created", scaffold_files().len());
        assert_eq!(steps[0], StepOutcome::done("scaffold", expected));
        assert_eq!(steps[1], StepOutcome::skipped("format"));
        assert_eq!(steps[2], StepOutcome::skipped("install"));
        assert!(temp.path().join("tsconfig.json").is_file());
    }

    #[tokio::test]
    async fn test_scaffold_keeps_edits() {
        let temp = TempDir::new().unwrap();
        let gitignore = temp.path().join(".gitignore");
        std::fs::write(&gitignore, "dist\n").unwrap();

        let steps = postprocess(temp.path(), SCAFFOLD_ONLY).await;

        let expected = format!("{} files created", scaffold_files().len() - 1);
        assert_eq!(steps[0], StepOutcome::done("scaffold", expected));
        assert_eq!(std::fs::read_to_string(gitignore).unwrap(), "dist\n");
    }

    #[tokio::test]
    async fn test_remove_node_modules() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("node_modules").join("left-pad");
        std::fs::create_dir_all(&package).unwrap();
        std::fs::write(package.join("index.js"), "").unwrap();

        remove_node_modules(temp.path()).await.unwrap();
        assert!(!temp.path().join("node_modules").exists());

        // Nothing to remove is not an error.
        remove_node_modules(temp.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_node_modules_kept_without_install() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("node_modules")).unwrap();

        postprocess(temp.path(), SCAFFOLD_ONLY).await;
        assert!(temp.path().join("node_modules").is_dir());
    }

    #[tokio::test]
    async fn test_missing_tool_is_a_failure_not_an_error() {
        let temp = TempDir::new().unwrap();
        let result = run_tool("nestforge-no-such-tool", &[], temp.path()).await;
        let outcome = finish("format", result.map(|()| String::new()));
        assert!(outcome.is_failed());
    }
}
