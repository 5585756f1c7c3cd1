//! Generate operation: schema model to NestJS project.

use std::{path::Path, sync::Arc};

use eyre::{Context, Result};
use nestforge_codegen::{Component, GenerateResult, Generator, ProjectSettings};
use nestforge_schema::SchemaModel;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, info, warn};

use crate::{
    config::GeneratorConfig,
    ops::postprocess,
    reports::{GenerateReport, GenerationResult, WrittenResult},
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    pub components: &'a [Component],
    /// Preview without writing files or post-processing.
    pub dry_run: bool,
    /// Extra warnings to carry into the report, e.g. ignored component names.
    pub warnings: Vec<String>,
}

/// Execute the generate operation.
pub async fn generate(
    config: &GeneratorConfig,
    model: SchemaModel,
    opts: GenerateOptions<'_>,
) -> Result<GenerateReport> {
    let settings = config.project_settings(&model);

    let mut warnings = opts.warnings;
    for warning in Generator::new(&model, &settings).warnings() {
        warn!("{}", warning);
        warnings.push(warning);
    }

    let mut report = GenerateReport {
        project_name: model.project_name.clone(),
        app_name: settings.app_name.clone(),
        database_name: model.database_name.clone(),
        table_count: model.tables().len(),
        components: opts.components.iter().map(|c| c.to_string()).collect(),
        warnings,
        result: GenerationResult::Preview(Vec::new()),
    };

    if opts.dry_run {
        report.result =
            GenerationResult::Preview(Generator::new(&model, &settings).preview(opts.components));
        return Ok(report);
    }

    let output_dir = config.output_dir();
    info!(dir = %output_dir.display(), components = opts.components.len(), "generating");
    let files = if config.jobs > 1 {
        generate_parallel(
            Arc::new(model),
            Arc::new(settings),
            opts.components,
            output_dir,
            config.jobs,
        )
        .await?
    } else {
        Generator::new(&model, &settings)
            .generate(opts.components, output_dir)
            .wrap_err("failed to generate project")?
    };
    info!(
        written = files.written.len(),
        unchanged = files.unchanged.len(),
        "generation finished"
    );

    let steps = postprocess(output_dir, config.post).await;
    if steps.iter().any(|s| s.is_failed()) {
        warn!("post-processing incomplete; generated files are kept");
    }
    report.result = GenerationResult::Written(WrittenResult {
        output_dir: output_dir.to_path_buf(),
        files,
        steps,
    });
    Ok(report)
}

/// Run components on the blocking pool, at most `jobs` at a time.
///
/// Components write disjoint paths. Results are merged back in component
/// order so the report does not depend on scheduling.
async fn generate_parallel(
    model: Arc<SchemaModel>,
    settings: Arc<ProjectSettings>,
    components: &[Component],
    output_dir: &Path,
    jobs: usize,
) -> Result<GenerateResult> {
    let permits = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for (index, component) in components.iter().copied().enumerate() {
        let model = Arc::clone(&model);
        let settings = Arc::clone(&settings);
        let permits = Arc::clone(&permits);
        let output_dir = output_dir.to_path_buf();
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            debug!(component = %component, "started");
            let result = tokio::task::spawn_blocking(move || {
                Generator::new(&model, &settings).generate_component(component, &output_dir)
            })
            .await??;
            Ok::<_, eyre::Report>((index, result))
        });
    }

    let mut results = Vec::with_capacity(components.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.wrap_err("generator task failed")??;
        results.push((index, result));
    }
    results.sort_by_key(|(index, _)| *index);

    let mut merged = GenerateResult::default();
    for (_, result) in results {
        merged.merge(result);
    }
    Ok(merged)
}
