use std::path::Path;

use anyhow::{Context, Result};
use prompt_bom_core::pipeline::{JsonSchemaValidator, ValidationPipeline, ValidationReport};
use prompt_bom_core::config::validate_config;
use tracing::{info, warn};

use crate::args::SourceArgs;
use crate::io::components::DirContentSource;
use crate::io::input;
use crate::output;

pub fn run(path: &Path, sources: &SourceArgs) -> Result<()> {
    let raw = input::read_manifest(path)?;
    let report = check(path, &raw, sources)?;
    output::report(&report)?;
    report.into_result()?;
    Ok(())
}

/// Validate manifest bytes read from `path` without printing anything.
pub(crate) fn check(path: &Path, raw: &[u8], sources: &SourceArgs) -> Result<ValidationReport> {
    let cfg = sources.to_config();
    validate_config(&cfg)?;

    let schema = input::load_schema(cfg.paths.schema_path.as_deref())?;
    let content = DirContentSource::new(&cfg.paths.components_dir, &cfg.paths.component_extension);

    let mut pipeline = ValidationPipeline::standard(&schema, &JsonSchemaValidator, cfg.limits.clone());
    if sources.verify_hashes {
        pipeline = pipeline.with_integrity(&content);
    }

    let source = path.display().to_string();
    let report = pipeline
        .run(&source, raw)
        .with_context(|| format!("validating {source}"))?;

    if report.is_valid() {
        info!(manifest = %source, "manifest valid");
    } else {
        warn!(manifest = %source, violations = report.violations.len(), "manifest invalid");
    }
    Ok(report)
}
