//! Subcommand implementations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use exam_cli::blueprint_file::load_blueprint;
use exam_compose::{
    ArtifactStore, ComposeError, CompositionOrchestrator, ContentGenerationService,
    GenerationFailure, GenerationRequest, JsonDirStore, TemplateGenerator,
};
use exam_model::{ArtifactId, AssessmentArtifact, Question, TenantId};
use exam_policy::load_policies_csv;
use exam_publish::{group_by_class, publish};
use exam_validate::{validate, write_report_json};

use crate::cli::{ComposeArgs, HistoryArgs, PublishArgs, ValidateArgs};
use crate::summary::{print_artifact_summary, print_findings, print_history};

/// Dry-run validation. Returns whether the blueprint passed.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let blueprint = load_blueprint(&args.blueprint)?;
    let registry = load_policies_csv(&args.policies).context("load policies")?;
    let policy = registry
        .resolve(&blueprint.tenant_id, &blueprint.class_id)
        .context("resolve class policy")?;

    let report = validate(&blueprint, policy);
    print_findings(&report);
    if let Some(path) = &args.report_json {
        let written = write_report_json(path, &blueprint, &report)
            .with_context(|| format!("write report to {}", path.display()))?;
        println!("Report: {}", written.display());
    }
    Ok(report.is_valid())
}

pub fn run_compose(args: &ComposeArgs) -> Result<bool> {
    let blueprint = load_blueprint(&args.blueprint)?;
    let registry = load_policies_csv(&args.policies).context("load policies")?;
    let mut store = JsonDirStore::open(&args.store).context("open artifact store")?;

    let section_count = blueprint.enabled_sections().count() as u64;
    let bar = ProgressBar::new(section_count);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} sections {msg}")
            .context("progress template")?,
    );
    let generator = ProgressGenerator {
        inner: TemplateGenerator::new(),
        bar: bar.clone(),
    };
    let orchestrator = CompositionOrchestrator::new(&registry, &generator);

    match orchestrator.submit(&mut store, &blueprint, &args.created_by) {
        Ok(artifact) => {
            bar.finish_and_clear();
            print_artifact_summary(&artifact);
            Ok(true)
        }
        Err(ComposeError::Rejected(rejected)) => {
            bar.finish_and_clear();
            print_findings(&rejected.report);
            Ok(false)
        }
        Err(error) => {
            bar.finish_and_clear();
            Err(error.into())
        }
    }
}

pub fn run_publish(args: &PublishArgs) -> Result<()> {
    let artifact_id = ArtifactId::from_hex(&args.artifact_id).context("parse artifact id")?;
    let start = parse_timestamp(args.start.as_deref()).context("parse --start")?;
    let end = parse_timestamp(args.end.as_deref()).context("parse --end")?;
    let mut store = JsonDirStore::open(&args.store).context("open artifact store")?;

    let published = publish(&mut store, &artifact_id, start, end)?;
    println!("Published {}", published.id);
    match (published.scheduled_start, published.scheduled_end) {
        (Some(start), Some(end)) => println!("Window: {} to {}", start.to_rfc3339(), end.to_rfc3339()),
        (Some(start), None) => println!("Window: from {}", start.to_rfc3339()),
        (None, Some(end)) => println!("Window: until {}", end.to_rfc3339()),
        (None, None) => println!("Window: open"),
    }
    Ok(())
}

pub fn run_history(args: &HistoryArgs) -> Result<()> {
    let tenant = TenantId::new(args.tenant.as_str()).context("parse tenant id")?;
    let store = JsonDirStore::open(&args.store).context("open artifact store")?;
    let artifacts: Vec<AssessmentArtifact> = store.list_tenant(&tenant)?;
    info!(tenant = %tenant, count = artifacts.len(), "loaded tenant artifacts");

    let grouped = group_by_class(&artifacts);
    print_history(&grouped);
    Ok(())
}

fn parse_timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(text) => {
            let parsed = DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("invalid RFC 3339 timestamp: {text}"))?;
            Ok(Some(parsed.with_timezone(&Utc)))
        }
    }
}

/// Wraps the template generator to advance the progress bar per section.
struct ProgressGenerator {
    inner: TemplateGenerator,
    bar: ProgressBar,
}

impl ContentGenerationService for ProgressGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationFailure> {
        self.bar.set_message(request.category.to_string());
        let questions = self.inner.generate(request)?;
        self.bar.inc(1);
        Ok(questions)
    }
}
