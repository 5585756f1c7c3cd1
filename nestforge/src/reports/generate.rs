//! Generate command report data structures.

use std::path::PathBuf;

use nestforge_codegen::{GenerateResult, PreviewFile};

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project name from the schema document.
    pub project_name: String,

    /// Application name used in the generated project.
    pub app_name: String,

    pub database_name: String,

    pub table_count: usize,

    /// Components that were generated, in order.
    pub components: Vec<String>,

    /// Model warnings and ignored component names.
    pub warnings: Vec<String>,

    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    pub files: GenerateResult,
    /// Post-processing steps, in the order they ran.
    pub steps: Vec<StepOutcome>,
}

/// How a post-processing step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done(String),
    Skipped,
    Failed(String),
}

/// One post-processing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub name: &'static str,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn done(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: StepStatus::Done(detail.into()),
        }
    }

    pub fn skipped(name: &'static str) -> Self {
        Self {
            name,
            status: StepStatus::Skipped,
        }
    }

    pub fn failed(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            status: StepStatus::Failed(reason.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, StepStatus::Failed(_))
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => Self::render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.title(&self.project_name);
        out.key_value("Database", &self.database_name);
        out.key_value("Application", &self.app_name);
        out.key_value("Tables", &self.table_count.to_string());
        out.key_value("Components", &self.components.join(", "));
        out.newline();

        let files = &written.files;
        if !files.written.is_empty() {
            out.section(&format!("Written ({})", files.written.len()));
            for path in &files.written {
                out.added_item(path);
            }
            out.newline();
        }

        if !written.steps.is_empty() {
            out.section("Post-processing");
            for step in &written.steps {
                let line = match &step.status {
                    StepStatus::Done(detail) => format!("{}: {}", step.name, detail),
                    StepStatus::Skipped => format!("{}: skipped", step.name),
                    StepStatus::Failed(reason) => format!("{}: failed ({})", step.name, reason),
                };
                out.list_item(&line);
            }
            out.newline();
        }

        out.key_value(
            "Generated",
            &format!(
                "{} ({} written, {} unchanged, {} kept)",
                written.output_dir.display(),
                files.written.len(),
                files.unchanged.len(),
                files.skipped.len()
            ),
        );
    }

    fn render_preview(out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", files.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    fn report(result: GenerationResult) -> GenerateReport {
        GenerateReport {
            project_name: "OptDb".into(),
            app_name: "opt-db".into(),
            database_name: "opt_db".into(),
            table_count: 2,
            components: vec!["entities".into(), "services".into()],
            warnings: vec!["unknown component `foo` ignored".into()],
            result,
        }
    }

    #[test]
    fn test_written_report() {
        let files = GenerateResult {
            written: vec!["src/app/entities/optin.entity.ts".into()],
            unchanged: vec!["src/main.ts".into()],
            skipped: Vec::new(),
        };
        let report = report(GenerationResult::Written(WrittenResult {
            output_dir: PathBuf::from("build"),
            files,
            steps: vec![
                StepOutcome::done("scaffold", "14 files created"),
                StepOutcome::skipped("install"),
                StepOutcome::failed("format", "npx not found"),
            ],
        }));

        let mut out = BufferOutput::default();
        report.render(&mut out);
        let text = out.text();

        assert!(text.starts_with("warning: unknown component `foo` ignored\n# OptDb\n"));
        assert!(text.contains("Written (1):\n  + src/app/entities/optin.entity.ts"));
        assert!(text.contains("  - scaffold: 14 files created"));
        assert!(text.contains("  - install: skipped"));
        assert!(text.contains("  - format: failed (npx not found)"));
        assert!(text.ends_with("Generated: build (1 written, 1 unchanged, 0 kept)"));
    }

    #[test]
    fn test_preview_report() {
        let report = report(GenerationResult::Preview(vec![PreviewFile {
            path: ".env".into(),
            content: "PORT=3000\n".into(),
        }]));

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines[1..],
            [
                "── .env ──".to_string(),
                "PORT=3000\n".to_string(),
                "── Summary ──".to_string(),
                "1 files would be generated".to_string(),
            ]
        );
    }
}
